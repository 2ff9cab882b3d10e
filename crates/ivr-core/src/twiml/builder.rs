//! Verb types and the response builder

/// How the provider trims silence from a captured recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trim {
    /// Strip leading and trailing silence
    #[default]
    TrimSilence,
    /// Keep the audio exactly as captured
    DoNotTrim,
}

impl Trim {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trim::TrimSilence => "trim-silence",
            Trim::DoNotTrim => "do-not-trim",
        }
    }
}

/// Parameters of a `<Record>` verb
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOptions {
    /// Endpoint the provider posts the finished recording to
    pub action: String,
    /// Maximum recording length in seconds
    pub max_length: u32,
    /// Keys that stop the recording
    pub finish_on_key: String,
    /// Play a beep before recording starts
    pub play_beep: bool,
    pub trim: Trim,
}

impl RecordOptions {
    /// Create record options reporting to `action`, with the provider's defaults
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            max_length: 3600,
            finish_on_key: "1234567890*#".to_string(),
            play_beep: true,
            trim: Trim::TrimSilence,
        }
    }

    pub fn max_length(mut self, seconds: u32) -> Self {
        self.max_length = seconds;
        self
    }

    pub fn finish_on_key(mut self, keys: impl Into<String>) -> Self {
        self.finish_on_key = keys.into();
        self
    }

    pub fn play_beep(mut self, play_beep: bool) -> Self {
        self.play_beep = play_beep;
        self
    }

    pub fn trim(mut self, trim: Trim) -> Self {
        self.trim = trim;
        self
    }
}

/// Parameters of a `<Gather>` verb, including the prompts nested inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatherOptions {
    /// Number of digits to collect before posting to `action`
    pub num_digits: u32,
    pub action: String,
    /// HTTP method the provider uses for `action`
    pub method: String,
    /// Verbs played while waiting for input
    pub prompts: Vec<Verb>,
}

impl GatherOptions {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            num_digits: 1,
            action: action.into(),
            method: "POST".to_string(),
            prompts: Vec::new(),
        }
    }

    pub fn num_digits(mut self, num_digits: u32) -> Self {
        self.num_digits = num_digits;
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Speak `text` while the gather is waiting for digits
    pub fn say(mut self, text: impl Into<String>) -> Self {
        self.prompts.push(Verb::Say(text.into()));
        self
    }

    /// Play audio at `url` while the gather is waiting for digits
    pub fn play(mut self, url: impl Into<String>) -> Self {
        self.prompts.push(Verb::Play(url.into()));
        self
    }
}

/// A single instruction in a voice response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Say(String),
    Play(String),
    Record(RecordOptions),
    Gather(GatherOptions),
    Redirect(String),
}

impl Verb {
    /// XML element name of this verb
    pub fn tag(&self) -> &'static str {
        match self {
            Verb::Say(_) => "Say",
            Verb::Play(_) => "Play",
            Verb::Record(_) => "Record",
            Verb::Gather(_) => "Gather",
            Verb::Redirect(_) => "Redirect",
        }
    }
}

/// A complete response document, built verb by verb
///
/// ```
/// use ivr_core::twiml::VoiceResponse;
///
/// let doc = VoiceResponse::new().say("Goodbye.");
/// assert!(doc.is_terminal());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceResponse {
    verbs: Vec<Verb>,
}

impl VoiceResponse {
    /// Create an empty response
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(mut self, text: impl Into<String>) -> Self {
        self.verbs.push(Verb::Say(text.into()));
        self
    }

    pub fn play(mut self, url: impl Into<String>) -> Self {
        self.verbs.push(Verb::Play(url.into()));
        self
    }

    pub fn record(mut self, options: RecordOptions) -> Self {
        self.verbs.push(Verb::Record(options));
        self
    }

    pub fn gather(mut self, options: GatherOptions) -> Self {
        self.verbs.push(Verb::Gather(options));
        self
    }

    pub fn redirect(mut self, target: impl Into<String>) -> Self {
        self.verbs.push(Verb::Redirect(target.into()));
        self
    }

    /// Verbs in the order the provider executes them
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    /// Whether the call ends once this document has been executed
    pub fn is_terminal(&self) -> bool {
        !self.verbs.iter().any(|verb| {
            matches!(verb, Verb::Record(_) | Verb::Gather(_) | Verb::Redirect(_))
        })
    }
}
