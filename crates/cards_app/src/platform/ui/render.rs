use std::fmt::Write as _;

use cards_core::{
    labels, AppViewModel, CardView, Labels, Language, LoadState, NotificationKind,
    NotificationView,
};
use chrono::{DateTime, NaiveDateTime};

use super::constants::*;
use super::layout::{page, PageParts};

/// The whole page for the current view. Pure; writing it out is the caller's job.
pub fn render_page(view: &AppViewModel) -> String {
    let labels = labels(view.language);
    let toolbar = render_toolbar(view.language, labels);
    let notification = render_notification(view.notification.as_ref());
    let loading = render_loading(view.loading, labels);
    let content = render_content(view, labels);

    page(&PageParts {
        language: view.language,
        title: labels.page_title,
        toolbar: &toolbar,
        notification: &notification,
        loading: &loading,
        content: &content,
    })
}

/// One card in `language`; `card.expanded` picks the visible summary pane.
pub fn render_card(card: &CardView, language: Language) -> String {
    let labels = labels(language);
    let id = escape(&card.dom_id);
    let (short_class, detailed_class) = if card.expanded {
        (HIDDEN_CLASS, "")
    } else {
        ("", HIDDEN_CLASS)
    };

    let mut html = String::new();
    let _ = write!(
        html,
        "<article class=\"knowledge-card{failed}\" id=\"card-{id}\">",
        failed = if card.failed { " failed" } else { "" },
    );

    html.push_str("<div class=\"card-header\">");
    let _ = write!(html, "<h3 class=\"card-title\">{}</h3>", escape(&card.title));
    if let Some(processed) = card.processed_at.as_deref() {
        let _ = write!(
            html,
            "<small class=\"processed-time\">{}: {}</small>",
            escape(labels.processed),
            escape(&format_processed_at(processed)),
        );
    }
    html.push_str("</div>");

    let _ = write!(
        html,
        "<section class=\"card-section\">\
         <div class=\"section-title\">📄 {summary}</div>\
         <div class=\"section-content summary-content\">\
         <div class=\"summary-short {short_class}\" id=\"{short_id}\">{short}\
         <button class=\"read-more-btn\" data-action=\"{ACTION_MORE}\" data-card-id=\"{id}\">{read_more}</button></div>\
         <div class=\"summary-detailed {detailed_class}\" id=\"{detailed_id}\">{detailed}\
         <button class=\"read-less-btn\" data-action=\"{ACTION_LESS}\" data-card-id=\"{id}\">{read_less}</button></div>\
         </div></section>",
        summary = escape(labels.summary),
        short_id = escape(&summary_short_id(&card.dom_id)),
        detailed_id = escape(&summary_detailed_id(&card.dom_id)),
        short = escape(&card.summary_short),
        detailed = escape(&card.summary_detailed),
        read_more = escape(labels.read_more),
        read_less = escape(labels.read_less),
    );

    let _ = write!(
        html,
        "<section class=\"card-section\">\
         <div class=\"section-title\">💡 {}</div>\
         <div class=\"section-content insights-content\"><ul>",
        escape(labels.key_insights),
    );
    for insight in &card.insights {
        let _ = write!(html, "<li>{}</li>", escape(insight));
    }
    html.push_str("</ul></div></section>");

    let _ = write!(
        html,
        "<section class=\"card-section\">\
         <div class=\"section-title\">🎧 {}</div>\
         <div class=\"section-content podcast-section\">",
        escape(labels.podcast),
    );
    match &card.podcast {
        Some(podcast) => {
            html.push_str("<audio class=\"audio-player\" controls>");
            let _ = write!(
                html,
                "<source src=\"{}\" type=\"audio/wav\">",
                escape(&podcast.file)
            );
            if let Some(alternate) = &podcast.alternate {
                let _ = write!(
                    html,
                    "<source src=\"{}\" type=\"audio/mpeg\">",
                    escape(alternate)
                );
            }
            let _ = write!(
                html,
                "{}</audio><p class=\"audio-filename\">🎵 {}</p>",
                escape(labels.audio_unsupported),
                escape(&podcast.file),
            );
        }
        None => {
            let _ = write!(
                html,
                "<div class=\"no-podcast\">{}</div>",
                escape(labels.no_podcast)
            );
        }
    }
    html.push_str("</div></section></article>");
    html
}

fn render_toolbar(active: Language, labels: &Labels) -> String {
    let mut html = String::from("<nav class=\"toolbar\">");
    for language in Language::ALL {
        let code = language.code();
        let _ = write!(
            html,
            "<button id=\"{id}\" class=\"lang-btn{active}\" data-action=\"{ACTION_LANG}\" data-lang=\"{code}\">{name}</button>",
            id = language_button_id(code),
            active = if language == active {
                format!(" {ACTIVE_CLASS}")
            } else {
                String::new()
            },
            name = escape(language.native_name()),
        );
    }
    let _ = write!(
        html,
        "<button id=\"{REFRESH_BUTTON}\" class=\"refresh-btn\" data-action=\"{ACTION_REFRESH}\">🔄 {}</button>",
        escape(labels.refresh),
    );
    html.push_str("</nav>");
    html
}

fn render_notification(notification: Option<&NotificationView>) -> String {
    match notification {
        Some(note) => {
            let kind = match note.kind {
                NotificationKind::Info => "info",
                NotificationKind::Success => "success",
                NotificationKind::Error => "error",
            };
            format!(
                "<div id=\"{NOTIFICATION}\" class=\"notification {kind}\" data-duration-ms=\"{ms}\">\
                 <span id=\"{NOTIFICATION_TEXT}\">{text}</span></div>",
                ms = note.duration.as_millis(),
                text = escape(&note.text),
            )
        }
        None => format!(
            "<div id=\"{NOTIFICATION}\" class=\"notification {HIDDEN_CLASS}\">\
             <span id=\"{NOTIFICATION_TEXT}\"></span></div>"
        ),
    }
}

fn render_loading(loading: bool, labels: &Labels) -> String {
    format!(
        "<div id=\"{LOADING}\" class=\"loading{hidden}\"><p>{text}</p></div>",
        hidden = if loading {
            String::new()
        } else {
            format!(" {HIDDEN_CLASS}")
        },
        text = escape(labels.loading),
    )
}

fn render_content(view: &AppViewModel, labels: &Labels) -> String {
    let mut html = String::new();
    if view.load_state == LoadState::Error {
        html.push_str(&render_error(view.error.as_deref(), labels));
    }
    if view.cards.is_empty() {
        if view.load_state == LoadState::Loaded {
            let _ = write!(
                html,
                "<div class=\"no-cards\">{}</div>",
                escape(labels.empty_state)
            );
        }
        return html;
    }
    for card in &view.cards {
        html.push_str(&render_card(card, view.language));
    }
    html
}

fn render_error(detail: Option<&str>, labels: &Labels) -> String {
    let mut html = String::from("<div class=\"error-card\">");
    let _ = write!(
        html,
        "<h3>⚠️ {}</h3><p>{}</p>",
        escape(labels.error_title),
        escape(labels.error_body)
    );
    if let Some(detail) = detail {
        let _ = write!(html, "<p class=\"error-detail\">{}</p>", escape(detail));
    }
    let _ = write!(
        html,
        "<button class=\"retry-btn\" data-action=\"{ACTION_RETRY}\">{}</button></div>",
        escape(labels.retry)
    );
    html
}

/// `2024-05-31T12:00:00.123456` -> `2024-05-31 12:00`; unparseable input is shown as-is.
fn format_processed_at(raw: &str) -> String {
    let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()));
    match parsed {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards_core::{CardEntry, LocalizedSummary};
    use pretty_assertions::assert_eq;
    use scraper::{Html, Selector};
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn entry(filename: &str, podcast: Option<&str>) -> CardEntry {
        CardEntry {
            filename: filename.to_string(),
            title: "Steel <Ladle> & Co".to_string(),
            summary: BTreeMap::from([
                (
                    Language::En,
                    LocalizedSummary {
                        short: "Short summary".to_string(),
                        detailed: "Detailed summary".to_string(),
                    },
                ),
                (
                    Language::Th,
                    LocalizedSummary {
                        short: "สรุปสั้น".to_string(),
                        detailed: "สรุปยาว".to_string(),
                    },
                ),
            ]),
            insights: BTreeMap::from([
                (
                    Language::En,
                    vec!["first".to_string(), "second".to_string(), "third".to_string()],
                ),
                (Language::Th, vec!["หนึ่ง".to_string()]),
            ]),
            podcast_file: podcast.map(str::to_string),
            processed_at: None,
            failed: false,
        }
    }

    fn select<'a>(doc: &'a Html, css: &str) -> Vec<scraper::ElementRef<'a>> {
        let selector = Selector::parse(css).unwrap();
        doc.select(&selector).collect()
    }

    fn has_class(element: &scraper::ElementRef<'_>, class: &str) -> bool {
        element.value().classes().any(|c| c == class)
    }

    fn card_html(card: &CardEntry, language: Language, expanded: bool) -> Html {
        Html::parse_fragment(&render_card(
            &CardView::project(card, language, expanded),
            language,
        ))
    }

    #[test]
    fn exactly_one_summary_pane_is_hidden() {
        let card = entry("a.pdf", None);
        for expanded in [false, true] {
            let doc = card_html(&card, Language::En, expanded);
            let short = &select(&doc, "#summary-short-a_pdf")[0];
            let detailed = &select(&doc, "#summary-detailed-a_pdf")[0];
            assert_eq!(has_class(short, HIDDEN_CLASS), expanded);
            assert_eq!(has_class(detailed, HIDDEN_CLASS), !expanded);
        }
    }

    #[test]
    fn toggle_buttons_carry_actions_instead_of_handlers() {
        let doc = card_html(&entry("My File.pdf", None), Language::En, false);
        let more = &select(&doc, "button.read-more-btn")[0];
        assert_eq!(more.value().attr("data-action"), Some("more"));
        assert_eq!(more.value().attr("data-card-id"), Some("My_File_pdf"));
        assert_eq!(more.value().attr("onclick"), None);
        let less = &select(&doc, "button.read-less-btn")[0];
        assert_eq!(less.value().attr("data-action"), Some("less"));
    }

    #[test]
    fn insights_are_listed_in_order() {
        let doc = card_html(&entry("a.pdf", None), Language::En, false);
        let items: Vec<String> = select(&doc, ".insights-content li")
            .iter()
            .map(|li| li.text().collect())
            .collect();
        assert_eq!(items, vec!["first", "second", "third"]);
    }

    #[test]
    fn wav_podcast_offers_mp3_alternate_and_caption() {
        let doc = card_html(&entry("a.pdf", Some("talk.wav")), Language::En, false);
        let sources: Vec<(Option<&str>, Option<&str>)> = select(&doc, "audio source")
            .iter()
            .map(|s| (s.value().attr("src"), s.value().attr("type")))
            .collect();
        assert_eq!(
            sources,
            vec![
                (Some("talk.wav"), Some("audio/wav")),
                (Some("talk.mp3"), Some("audio/mpeg")),
            ]
        );
        let caption: String = select(&doc, ".audio-filename")[0].text().collect();
        assert!(caption.contains("talk.wav"));
        assert!(select(&doc, ".no-podcast").is_empty());
    }

    #[test]
    fn missing_podcast_renders_one_localized_placeholder() {
        let card = entry("a.pdf", None);

        let doc = card_html(&card, Language::En, false);
        let placeholders = select(&doc, ".no-podcast");
        assert_eq!(placeholders.len(), 1);
        assert!(select(&doc, "audio").is_empty());

        let doc = card_html(&card, Language::Th, false);
        let text: String = select(&doc, ".no-podcast")[0].text().collect();
        assert_eq!(text, "ยังไม่พบ file podcast เรื่องนี้");
    }

    #[test]
    fn card_text_is_escaped() {
        let html = render_card(
            &CardView::project(&entry("a.pdf", None), Language::En, false),
            Language::En,
        );
        assert!(html.contains("Steel &lt;Ladle&gt; &amp; Co"));
        let doc = Html::parse_fragment(&html);
        assert!(select(&doc, "ladle").is_empty());
    }

    #[test]
    fn language_projection_switches_text_only() {
        let card = entry("a.pdf", None);
        let doc = card_html(&card, Language::Th, false);
        let short: String = select(&doc, "#summary-short-a_pdf")[0].text().collect();
        assert!(short.starts_with("สรุปสั้น"));
        assert!(short.contains("อ่านเพิ่มเติม"));
    }

    #[test]
    fn processed_time_is_formatted() {
        assert_eq!(
            format_processed_at("2024-05-31T12:00:00.123456"),
            "2024-05-31 12:00"
        );
        assert_eq!(format_processed_at("2024-05-31T12:00:00+07:00"), "2024-05-31 12:00");
        assert_eq!(format_processed_at("yesterday"), "yesterday");

        let mut card = entry("a.pdf", None);
        card.processed_at = Some("2024-05-31T12:00:00".to_string());
        let doc = card_html(&card, Language::En, false);
        let text: String = select(&doc, ".processed-time")[0].text().collect();
        assert_eq!(text, "Processed: 2024-05-31 12:00");
    }

    fn view(load_state: LoadState, cards: &[CardEntry]) -> AppViewModel {
        AppViewModel {
            language: Language::En,
            load_state,
            loading: load_state == LoadState::Loading,
            cards: cards
                .iter()
                .map(|c| CardView::project(c, Language::En, false))
                .collect(),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn page_marks_exactly_the_active_language() {
        let mut model = view(LoadState::Loaded, &[entry("a.pdf", None)]);
        model.language = Language::Th;
        let doc = Html::parse_document(&render_page(&model));

        let active: Vec<Option<&str>> = select(&doc, ".lang-btn.active")
            .iter()
            .map(|b| b.value().attr("id"))
            .collect();
        assert_eq!(active, vec![Some("lang-th")]);
        assert_eq!(select(&doc, "#refresh-btn").len(), 1);
        assert_eq!(select(&doc, "html")[0].value().attr("lang"), Some("th"));
    }

    #[test]
    fn empty_load_shows_empty_state_not_error() {
        let doc = Html::parse_document(&render_page(&view(LoadState::Loaded, &[])));
        assert_eq!(select(&doc, "#cards-container .no-cards").len(), 1);
        assert!(select(&doc, ".error-card").is_empty());
        assert!(has_class(&select(&doc, "#loading")[0], HIDDEN_CLASS));
    }

    #[test]
    fn error_state_offers_retry_and_keeps_cards() {
        let mut model = view(LoadState::Error, &[entry("a.pdf", None)]);
        model.error = Some("http status 500: API request failed".to_string());
        let doc = Html::parse_document(&render_page(&model));

        let retry = select(&doc, ".error-card button");
        assert_eq!(retry.len(), 1);
        assert_eq!(retry[0].value().attr("data-action"), Some("retry"));
        assert_eq!(select(&doc, ".knowledge-card").len(), 1);
        assert!(select(&doc, ".no-cards").is_empty());
    }

    #[test]
    fn loading_without_cards_shows_only_the_indicator() {
        let doc = Html::parse_document(&render_page(&view(LoadState::Loading, &[])));
        assert!(!has_class(&select(&doc, "#loading")[0], HIDDEN_CLASS));
        assert!(select(&doc, ".no-cards").is_empty());
    }

    #[test]
    fn notification_banner_shows_text_or_hides() {
        let mut model = view(LoadState::Loaded, &[]);
        let doc = Html::parse_document(&render_page(&model));
        assert!(has_class(&select(&doc, "#new-file-notification")[0], HIDDEN_CLASS));

        model.notification = Some(NotificationView {
            id: 1,
            kind: NotificationKind::Success,
            text: "1 new file(s) loaded!".to_string(),
            duration: Duration::from_millis(3000),
        });
        let doc = Html::parse_document(&render_page(&model));
        let banner = &select(&doc, "#new-file-notification")[0];
        assert!(has_class(banner, "success"));
        assert_eq!(banner.value().attr("data-duration-ms"), Some("3000"));
        let text: String = select(&doc, "#notification-text")[0].text().collect();
        assert_eq!(text, "1 new file(s) loaded!");
    }
}
