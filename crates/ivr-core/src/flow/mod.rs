//! Call flow state machine
//!
//! Greets the caller, records, plays the recording back and offers one
//! repeat branch. The provider holds call continuity; each webhook carries
//! its step implicitly through the endpoint it hits.

mod engine;
mod types;

pub use engine::{
    advance, goodbye, greet, on_playback_choice, on_recording_complete, FINISH_ON_KEY,
    FIRST_TIME_GREETING, GOODBYE, MAX_RECORDING_SECONDS, NO_RECORDING_PROMPT, PLAYBACK_INTRO,
    PLAYBACK_MENU_PROMPT, RECORD_AGAIN_DIGIT, REPEAT_GREETING,
};
pub use types::{
    CallStep, CallerInput, Transition, PLAYBACK_PATH, RECORD_PATH, VOICE_PATH, VOICE_REPEAT_PATH,
};
