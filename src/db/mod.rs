mod budgets;
mod categories;
mod goals;
mod payment_methods;
mod reset_codes;
mod transactions;
mod users;

pub use budgets::BudgetRepo;
pub use categories::CategoryRepo;
pub use goals::GoalRepo;
pub use payment_methods::PaymentMethodRepo;
pub use reset_codes::ResetCodeRepo;
pub use transactions::TransactionRepo;
pub use users::UserRepo;
