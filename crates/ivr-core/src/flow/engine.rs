//! Call flow engine
//!
//! Pure functions from (step, caller input) to the next response document.
//! Every input, including missing or malformed fields, maps to a document.

use tracing::debug;

use super::types::{CallStep, CallerInput, Transition, PLAYBACK_PATH, RECORD_PATH, VOICE_REPEAT_PATH};
use crate::twiml::{GatherOptions, RecordOptions, Trim, VoiceResponse};

/// Long instructions read to first-time callers
pub const FIRST_TIME_GREETING: &str = "Welcome to the microphone test service. This tool will help you test your microphone quality. After the beep, please speak normally to test your microphone. When you're finished recording, press the pound key. You'll then hear your recording played back, allowing you to evaluate your microphone's sound quality.";

/// Short instructions read when the caller records again
pub const REPEAT_GREETING: &str = "Speak after the beep. Press pound when done.";

pub const NO_RECORDING_PROMPT: &str = "No recording was detected. Let's try again.";
pub const PLAYBACK_INTRO: &str = "Here is your recording:";
pub const PLAYBACK_MENU_PROMPT: &str = "Press 1 to record again, or hang up to end the call.";
pub const GOODBYE: &str = "Thank you for using the microphone test service. Goodbye.";

/// Recording cap declared to the provider, in seconds
pub const MAX_RECORDING_SECONDS: u32 = 30;
pub const FINISH_ON_KEY: &str = "#";
/// Keypress that restarts recording after playback
pub const RECORD_AGAIN_DIGIT: &str = "1";

/// Greeting followed by a recording request
///
/// Only the spoken text depends on `first_time`; the recording parameters are
/// the same for both variants.
pub fn greet(first_time: bool) -> VoiceResponse {
    let message = if first_time {
        FIRST_TIME_GREETING
    } else {
        REPEAT_GREETING
    };

    VoiceResponse::new().say(message).record(
        RecordOptions::new(RECORD_PATH)
            .max_length(MAX_RECORDING_SECONDS)
            .finish_on_key(FINISH_ON_KEY)
            .play_beep(true)
            .trim(Trim::TrimSilence),
    )
}

/// Response to the provider posting a finished recording
///
/// An absent or empty URL sends the caller back to the short greeting.
pub fn on_recording_complete(recording_url: Option<&str>) -> VoiceResponse {
    match recording_url.filter(|url| !url.is_empty()) {
        None => VoiceResponse::new()
            .say(NO_RECORDING_PROMPT)
            .redirect(VOICE_REPEAT_PATH),
        Some(url) => VoiceResponse::new()
            .say(PLAYBACK_INTRO)
            .play(url)
            .gather(
                GatherOptions::new(PLAYBACK_PATH)
                    .num_digits(1)
                    .method("POST")
                    .say(PLAYBACK_MENU_PROMPT),
            )
            .say(GOODBYE),
    }
}

/// Response to the caller's choice after playback
///
/// Exactly `"1"` records again; anything else ends the call.
pub fn on_playback_choice(digits: Option<&str>) -> VoiceResponse {
    if digits == Some(RECORD_AGAIN_DIGIT) {
        VoiceResponse::new().redirect(VOICE_REPEAT_PATH)
    } else {
        goodbye()
    }
}

/// Closing document with no further action
pub fn goodbye() -> VoiceResponse {
    VoiceResponse::new().say(GOODBYE)
}

/// Advance the call from `step` with `input`
///
/// Input of the wrong kind for the step is treated as absent.
pub fn advance(step: CallStep, input: &CallerInput) -> Transition {
    let transition = match step {
        CallStep::Greeting | CallStep::RepeatGreeting => Transition {
            response: greet(step == CallStep::Greeting),
            next: CallStep::AwaitingRecording,
        },
        CallStep::AwaitingRecording => {
            let url = input.recording_url();
            Transition {
                response: on_recording_complete(url),
                next: if url.is_some() {
                    CallStep::PostPlayback
                } else {
                    CallStep::RepeatGreeting
                },
            }
        }
        CallStep::PostPlayback => {
            let digits = input.digits();
            Transition {
                response: on_playback_choice(digits),
                next: if digits == Some(RECORD_AGAIN_DIGIT) {
                    CallStep::RepeatGreeting
                } else {
                    CallStep::Terminal
                },
            }
        }
        CallStep::Terminal => Transition {
            response: goodbye(),
            next: CallStep::Terminal,
        },
    };

    debug!(from = %step, to = %transition.next, "Call flow transition");
    transition
}
