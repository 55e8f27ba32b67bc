pub mod register;
pub mod resolve;
pub mod run;
pub mod status;
pub mod unregister;
