pub mod csr;
pub mod desktop;
pub mod lifecycle;
pub mod modal;
pub mod notifications;
pub mod supervisor;
pub mod transcript;
