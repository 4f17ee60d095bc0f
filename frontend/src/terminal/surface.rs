use web_sys::{Document, Element};

use super::machine::Render;
use crate::error::EffectError;

/// Where the typing loop projects its state.
pub trait TerminalSurface {
    fn show_command(&self, text: &str);
    fn show_output(&self, text: &str);
    fn clear_output(&self);

    fn apply(&self, render: &Render) {
        match render {
            Render::Command(text) => self.show_command(text),
            Render::Output(text) => self.show_output(text),
            Render::ClearOutput => self.clear_output(),
        }
    }
}

/// The `.typed-text` / `.terminal-output` pair in the landing page.
pub struct DomTerminal {
    document: Document,
    text: Element,
    output: Element,
}

impl DomTerminal {
    /// Looks up both display elements. Returns `None` unless both exist.
    pub fn find(
        document: &Document,
        text_selector: &str,
        output_selector: &str,
    ) -> Result<Option<Self>, EffectError> {
        let text = document.query_selector(text_selector)?;
        let output = document.query_selector(output_selector)?;
        Ok(match (text, output) {
            (Some(text), Some(output)) => Some(Self {
                document: document.clone(),
                text,
                output,
            }),
            _ => None,
        })
    }
}

impl TerminalSurface for DomTerminal {
    fn show_command(&self, text: &str) {
        self.text.set_text_content(Some(text));
    }

    fn show_output(&self, text: &str) {
        let line = match self.document.create_element("div") {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Failed to create terminal output line: {:?}", e);
                return;
            }
        };
        line.set_class_name("output-text");
        line.set_text_content(Some(text));
        self.output.set_inner_html("");
        if let Err(e) = self.output.append_child(&line) {
            log::warn!("Failed to show terminal output: {:?}", e);
        }
    }

    fn clear_output(&self) {
        self.output.set_inner_html("");
    }
}
