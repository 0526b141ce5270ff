use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::theme::ResolvedTheme;

/// Builder for the one-line status bar under the feed.
///
/// Layout: `[Label] [Loading?] Position | Notice? | Help Text`
pub struct StatusBar<'a> {
    theme: &'a ResolvedTheme,
    label: &'a str,
    loading_text: Option<String>,
    position: Option<(usize, usize)>,
    notice: Option<&'a str>,
    help_text: &'a str,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &'a ResolvedTheme) -> Self {
        Self {
            theme,
            label: "",
            loading_text: None,
            position: None,
            notice: None,
            help_text: "",
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    pub fn loading(mut self, text: impl Into<String>) -> Self {
        self.loading_text = Some(text.into());
        self
    }

    /// 1-based position; nothing is shown for an empty feed.
    pub fn position(mut self, current: usize, total: usize) -> Self {
        if total > 0 {
            self.position = Some((current, total));
        }
        self
    }

    /// Transient message such as a failed page load, shown in the error color.
    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    pub fn help(mut self, text: &'a str) -> Self {
        self.help_text = text;
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;
        let mut sections: Vec<Span> = Vec::new();
        if let Some(loading) = self.loading_text {
            sections.push(Span::styled(loading, theme.spinner_style()));
        }
        if let Some((current, total)) = self.position {
            sections.push(Span::styled(format!("{current}/{total}"), theme.dim_style()));
        }
        if let Some(notice) = self.notice {
            sections.push(Span::styled(notice.to_string(), theme.error_style()));
        }
        sections.push(Span::styled(self.help_text.to_string(), theme.dim_style()));

        let mut spans = vec![
            Span::styled(format!(" {} ", self.label), theme.status_bar_style()),
            Span::raw(" "),
        ];
        for (i, section) in sections.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(section);
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
