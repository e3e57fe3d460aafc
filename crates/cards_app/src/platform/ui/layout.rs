use cards_core::Language;

use super::constants::*;
use super::render::escape;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f4f6fb;color:#1f2933}
header{display:flex;gap:.5rem;align-items:center;padding:1rem 2rem;background:#1e3a8a;color:#fff}
header h1{flex:1;margin:0;font-size:1.4rem}
.lang-btn,.refresh-btn,.retry-btn{border:0;border-radius:4px;padding:.4rem .8rem;cursor:pointer}
.lang-btn.active{background:#facc15}
.notification{margin:1rem 2rem;padding:.6rem 1rem;border-radius:4px;background:#dbeafe}
.notification.success{background:#dcfce7}
.notification.error{background:#fee2e2}
.loading{padding:2rem;text-align:center}
#cards-container{display:grid;grid-template-columns:repeat(auto-fill,minmax(360px,1fr));gap:1rem;padding:1rem 2rem}
.knowledge-card{background:#fff;border-radius:8px;padding:1rem;box-shadow:0 1px 3px rgba(0,0,0,.1)}
.knowledge-card.failed{border-left:4px solid #dc2626}
.section-title{font-weight:600;margin-top:.8rem}
.no-podcast,.no-cards{color:#6b7280;font-style:italic}
.error-card{background:#fee2e2;border-radius:8px;padding:1rem}
.hidden{display:none}
";

/// Everything the page body is assembled from; each part is already-rendered markup.
pub struct PageParts<'a> {
    pub language: Language,
    pub title: &'a str,
    pub toolbar: &'a str,
    pub notification: &'a str,
    pub loading: &'a str,
    pub content: &'a str,
}

pub fn page(parts: &PageParts<'_>) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n\
         <body>\n\
         <header><h1>{title}</h1>{toolbar}</header>\n\
         {notification}\n\
         {loading}\n\
         <main id=\"{CARDS_CONTAINER}\">{content}</main>\n\
         </body>\n\
         </html>\n",
        lang = parts.language.code(),
        title = escape(parts.title),
        toolbar = parts.toolbar,
        notification = parts.notification,
        loading = parts.loading,
        content = parts.content,
    )
}
