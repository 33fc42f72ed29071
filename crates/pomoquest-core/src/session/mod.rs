mod countdown;
pub mod durations;
mod state;

pub use countdown::{follow_up, start_actions, Countdown};
pub use state::{break_after, Phase, SessionState};
