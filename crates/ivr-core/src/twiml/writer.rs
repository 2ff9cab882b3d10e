//! XML serialization of voice responses
//!
//! Text content is partially escaped: `<`, `>` and `&` are replaced, quotes
//! are left alone so prompts like "you're" stay readable in the output.

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::builder::{GatherOptions, RecordOptions, Verb, VoiceResponse};
use crate::error::{Error, Result};

const INDENT_WIDTH: usize = 4;

impl VoiceResponse {
    /// Render the document as provider XML
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(render_error)?;
        writer
            .write_event(Event::Start(BytesStart::new("Response")))
            .map_err(render_error)?;
        for verb in self.verbs() {
            write_verb(&mut writer, verb)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("Response")))
            .map_err(render_error)?;

        String::from_utf8(writer.into_inner()).map_err(render_error)
    }
}

fn write_verb(writer: &mut Writer<Vec<u8>>, verb: &Verb) -> Result<()> {
    match verb {
        Verb::Say(text) | Verb::Play(text) | Verb::Redirect(text) => {
            write_text_element(writer, verb.tag(), text)
        }
        Verb::Record(options) => {
            let element = record_element(options);
            writer.write_event(Event::Empty(element)).map_err(render_error)
        }
        Verb::Gather(options) => write_gather(writer, options),
    }
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(render_error)?;
    writer
        .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
        .map_err(render_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(render_error)
}

fn record_element(options: &RecordOptions) -> BytesStart<'static> {
    let max_length = options.max_length.to_string();
    let play_beep = options.play_beep.to_string();

    let mut element = BytesStart::new("Record");
    element.push_attribute(("action", options.action.as_str()));
    element.push_attribute(("maxLength", max_length.as_str()));
    element.push_attribute(("finishOnKey", options.finish_on_key.as_str()));
    element.push_attribute(("playBeep", play_beep.as_str()));
    element.push_attribute(("trim", options.trim.as_str()));
    element
}

fn write_gather(writer: &mut Writer<Vec<u8>>, options: &GatherOptions) -> Result<()> {
    let num_digits = options.num_digits.to_string();

    let mut element = BytesStart::new("Gather");
    element.push_attribute(("numDigits", num_digits.as_str()));
    element.push_attribute(("action", options.action.as_str()));
    element.push_attribute(("method", options.method.as_str()));

    if options.prompts.is_empty() {
        return writer.write_event(Event::Empty(element)).map_err(render_error);
    }

    writer.write_event(Event::Start(element)).map_err(render_error)?;
    for prompt in &options.prompts {
        write_verb(writer, prompt)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("Gather")))
        .map_err(render_error)
}

fn render_error<E: std::fmt::Display>(err: E) -> Error {
    Error::Render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twiml::Trim;

    #[test]
    fn test_empty_response() {
        let xml = VoiceResponse::new().to_xml().unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<Response>"));
        assert!(xml.ends_with("</Response>"));
    }

    #[test]
    fn test_say_and_redirect_layout() {
        let xml = VoiceResponse::new()
            .say("No recording was detected. Let's try again.")
            .redirect("/voice/repeat")
            .to_xml()
            .unwrap();

        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<Response>
    <Say>No recording was detected. Let's try again.</Say>
    <Redirect>/voice/repeat</Redirect>
</Response>"#;
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_record_attributes_in_order() {
        let xml = VoiceResponse::new()
            .record(
                RecordOptions::new("/record")
                    .max_length(30)
                    .finish_on_key("#")
                    .play_beep(true)
                    .trim(Trim::TrimSilence),
            )
            .to_xml()
            .unwrap();

        assert!(xml.contains(
            r##"<Record action="/record" maxLength="30" finishOnKey="#" playBeep="true" trim="trim-silence"/>"##
        ));
    }

    #[test]
    fn test_gather_with_nested_say() {
        let xml = VoiceResponse::new()
            .gather(GatherOptions::new("/playback").say("Press 1"))
            .to_xml()
            .unwrap();

        assert!(xml.contains(r#"<Gather numDigits="1" action="/playback" method="POST">"#));
        assert!(xml.contains("        <Say>Press 1</Say>"));
        assert!(xml.contains("    </Gather>"));
    }

    #[test]
    fn test_gather_without_prompts_is_empty_element() {
        let xml = VoiceResponse::new()
            .gather(GatherOptions::new("/playback"))
            .to_xml()
            .unwrap();

        assert!(xml.contains(r#"<Gather numDigits="1" action="/playback" method="POST"/>"#));
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        let xml = VoiceResponse::new()
            .play("https://example.com/a.wav?x=1&y=<2>")
            .to_xml()
            .unwrap();

        assert!(xml.contains("<Play>https://example.com/a.wav?x=1&amp;y=&lt;2&gt;</Play>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let doc = VoiceResponse::new().say("hi").play("https://ex.com/a.wav");
        assert_eq!(doc.to_xml().unwrap(), doc.to_xml().unwrap());
    }
}
