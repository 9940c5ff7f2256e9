use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

use crate::core::InvoiceError;

fn render_io(e: std::io::Error) -> InvoiceError {
    InvoiceError::Render(format!("markup write error: {e}"))
}

/// Indented HTML writer over quick-xml.
pub struct MarkupWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl MarkupWriter {
    pub fn new() -> Result<Self, InvoiceError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::DocType(BytesText::from_escaped("html")))
            .map_err(render_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> Result<String, InvoiceError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| InvoiceError::Render(format!("markup UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, InvoiceError> {
        self.start_element_with_attrs(name, &[])
    }

    pub fn start_element_with_class(
        &mut self,
        name: &str,
        class: &str,
    ) -> Result<&mut Self, InvoiceError> {
        self.start_element_with_attrs(name, &[("class", class)])
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, InvoiceError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(render_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, InvoiceError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(render_io)?;
        Ok(self)
    }

    /// `<name class="...">text</name>`. Empty text still writes an explicit
    /// end tag, since `<span/>` is not self-closing in HTML.
    pub fn text_element_with_class(
        &mut self,
        name: &str,
        class: &str,
        text: &str,
    ) -> Result<&mut Self, InvoiceError> {
        if class.is_empty() {
            self.start_element(name)?;
        } else {
            self.start_element_with_class(name, class)?;
        }
        if !text.is_empty() {
            self.writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(render_io)?;
        }
        self.end_element(name)
    }

    /// A void element such as `<img>` or `<meta>`.
    pub fn void_element(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, InvoiceError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Empty(elem))
            .map_err(render_io)?;
        Ok(self)
    }
}
