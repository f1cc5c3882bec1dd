mod compare;
mod home;
mod predictor;

pub use compare::Compare;
pub use home::Home;
pub use predictor::Predictor;
