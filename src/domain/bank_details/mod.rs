pub mod model;
pub mod repository;

pub use model::{
    BankDetails, BankDetailsFilter, BankDetailsKey, BankDetailsQuery, BankDetailsSortField,
    CreateBankDetails, UpdateBankDetails,
};
pub use repository::BankDetailsRepository;
