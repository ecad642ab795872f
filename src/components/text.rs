//! # Text Component

use super::Component;
use crate::ir::Op;
use crate::protocol::text::{Alignment, CharSize};

/// A line of text with optional alignment, emphasis and size.
///
/// Styles set by the component are reset after the line, so the next
/// component starts from normal size with emphasis off.
///
/// ```
/// use mizan::components::Text;
///
/// let header = Text::new("CORNER SHOP").center().bold().double();
/// let total = Text::new("TOTAL: 10.500").right().bold();
/// ```
#[derive(Debug, Clone)]
pub struct Text {
    content: String,
    alignment: Option<Alignment>,
    bold: bool,
    size: CharSize,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            alignment: None,
            bold: false,
            size: CharSize::Normal,
        }
    }

    pub fn left(mut self) -> Self {
        self.alignment = Some(Alignment::Left);
        self
    }

    pub fn center(mut self) -> Self {
        self.alignment = Some(Alignment::Center);
        self
    }

    pub fn right(mut self) -> Self {
        self.alignment = Some(Alignment::Right);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Double width and height.
    pub fn double(mut self) -> Self {
        self.size = CharSize::Double;
        self
    }
}

impl Component for Text {
    fn emit(&self, ops: &mut Vec<Op>) {
        if let Some(align) = self.alignment {
            ops.push(Op::SetAlign(align));
        }
        if self.size != CharSize::Normal {
            ops.push(Op::SetSize(self.size));
        }
        if self.bold {
            ops.push(Op::SetBold(true));
        }

        ops.push(Op::Text(self.content.clone()));
        ops.push(Op::Newline);

        match (self.size, self.bold) {
            (CharSize::Normal, false) => {}
            (CharSize::Normal, true) => ops.push(Op::SetBold(false)),
            (CharSize::Double, _) => ops.push(Op::ResetStyle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentExt;

    #[test]
    fn test_plain_text() {
        let ir = Text::new("Hello").compile();
        assert_eq!(
            ir.ops,
            vec![Op::Init, Op::Text("Hello".into()), Op::Newline]
        );
    }

    #[test]
    fn test_headline_resets_formatting() {
        let ir = Text::new("SHOP").center().double().bold().compile();
        assert_eq!(
            ir.ops,
            vec![
                Op::Init,
                Op::SetAlign(Alignment::Center),
                Op::SetSize(CharSize::Double),
                Op::SetBold(true),
                Op::Text("SHOP".into()),
                Op::Newline,
                Op::ResetStyle,
            ]
        );
    }

    #[test]
    fn test_bold_only_turns_bold_off() {
        let ir = Text::new("TOTAL").right().bold().compile();
        assert_eq!(ir.ops.last(), Some(&Op::SetBold(false)));
        assert!(ir.ops.contains(&Op::SetAlign(Alignment::Right)));
    }
}
