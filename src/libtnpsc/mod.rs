pub mod dataset;
pub mod form;
pub mod router;
pub mod session;
pub mod theme;
pub mod timer;
pub mod validator;
