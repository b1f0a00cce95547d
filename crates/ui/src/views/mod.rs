mod detector;
mod home;
mod state;
mod threats;
mod training;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

#[cfg(test)]
pub(crate) use detector::DetectorTestHandles;
pub use detector::DetectorView;
pub use home::HomeView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use threats::ThreatsView;
pub use training::TrainingView;
