pub mod gate;
pub mod login;

pub use gate::AuthGate;
pub use login::Login;
