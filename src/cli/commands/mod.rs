pub mod check;
pub mod commit;
pub mod inspect;
pub mod session;
