//! Call flow types

use crate::twiml::VoiceResponse;

/// Webhook path of the first-time greeting
pub const VOICE_PATH: &str = "/voice";
/// Webhook path of the short greeting used on repeat
pub const VOICE_REPEAT_PATH: &str = "/voice/repeat";
/// Webhook path the provider posts finished recordings to
pub const RECORD_PATH: &str = "/record";
/// Webhook path the provider posts the post-playback keypress to
pub const PLAYBACK_PATH: &str = "/playback";

/// Step of the call a webhook request belongs to
///
/// Nothing is stored between requests: the provider carries the step by
/// choosing which endpoint to call next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStep {
    /// Inbound call, long instructions
    Greeting,
    /// Caller is recording again, short instructions
    RepeatGreeting,
    /// Recording finished (or timed out) and was posted back
    AwaitingRecording,
    /// Playback done, caller chose what to do next
    PostPlayback,
    /// Goodbye was said; the provider hangs up
    Terminal,
}

impl CallStep {
    /// Endpoint the provider calls to enter this step
    pub fn path(&self) -> Option<&'static str> {
        match self {
            CallStep::Greeting => Some(VOICE_PATH),
            CallStep::RepeatGreeting => Some(VOICE_REPEAT_PATH),
            CallStep::AwaitingRecording => Some(RECORD_PATH),
            CallStep::PostPlayback => Some(PLAYBACK_PATH),
            CallStep::Terminal => None,
        }
    }

    /// Step served by the endpoint at `path`
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            VOICE_PATH => Some(CallStep::Greeting),
            VOICE_REPEAT_PATH => Some(CallStep::RepeatGreeting),
            RECORD_PATH => Some(CallStep::AwaitingRecording),
            PLAYBACK_PATH => Some(CallStep::PostPlayback),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CallStep::Terminal)
    }
}

impl std::fmt::Display for CallStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CallStep::Greeting => "greeting",
            CallStep::RepeatGreeting => "repeat_greeting",
            CallStep::AwaitingRecording => "awaiting_recording",
            CallStep::PostPlayback => "post_playback",
            CallStep::Terminal => "terminal",
        };
        f.write_str(name)
    }
}

/// What the caller supplied with a webhook request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CallerInput {
    /// No input fields at all
    #[default]
    Nothing,
    /// `RecordingUrl` from the provider; empty means nothing was captured
    Recording(Option<String>),
    /// `Digits` pressed by the caller; empty means no key was pressed
    Keypress(Option<String>),
}

impl CallerInput {
    /// Recording URL, if one was actually captured
    pub fn recording_url(&self) -> Option<&str> {
        match self {
            CallerInput::Recording(Some(url)) if !url.is_empty() => Some(url.as_str()),
            _ => None,
        }
    }

    /// Pressed digits, if any
    pub fn digits(&self) -> Option<&str> {
        match self {
            CallerInput::Keypress(Some(digits)) if !digits.is_empty() => Some(digits.as_str()),
            _ => None,
        }
    }
}

/// Result of advancing the call by one webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Document returned to the provider
    pub response: VoiceResponse,
    /// Step the call is in once the document has been executed
    pub next: CallStep,
}
