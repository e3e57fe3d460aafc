//! Fixed UI strings for each supported language.
use crate::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub page_title: &'static str,
    pub refresh: &'static str,
    pub loading: &'static str,
    pub summary: &'static str,
    pub read_more: &'static str,
    pub read_less: &'static str,
    pub key_insights: &'static str,
    pub podcast: &'static str,
    pub no_podcast: &'static str,
    pub audio_unsupported: &'static str,
    pub processed: &'static str,
    pub empty_state: &'static str,
    pub error_title: &'static str,
    pub error_body: &'static str,
    pub retry: &'static str,
    pub checking_for_new_files: &'static str,
    pub no_new_files: &'static str,
    pub refresh_failed: &'static str,
}

const EN: Labels = Labels {
    page_title: "Knowledge Base",
    refresh: "Refresh",
    loading: "Loading knowledge cards...",
    summary: "Summary",
    read_more: "Read More",
    read_less: "Read Less",
    key_insights: "Key Insights",
    podcast: "Podcast",
    no_podcast: "No podcast file found for this document yet",
    audio_unsupported: "Your browser does not support the audio element.",
    processed: "Processed",
    empty_state: "No PDF files found in KB folder. Add some PDF files and refresh!",
    error_title: "Connection Error",
    error_body: "Unable to load knowledge cards from server.",
    retry: "Try Again",
    checking_for_new_files: "Checking for new files...",
    no_new_files: "No new files found",
    refresh_failed: "Error refreshing files",
};

const TH: Labels = Labels {
    page_title: "คลังความรู้",
    refresh: "รีเฟรช",
    loading: "กำลังโหลดการ์ดความรู้...",
    summary: "สรุป",
    read_more: "อ่านเพิ่มเติม",
    read_less: "อ่านน้อยลง",
    key_insights: "ข้อมูลเชิงลึกสำคัญ",
    podcast: "พอดแคสต์",
    no_podcast: "ยังไม่พบ file podcast เรื่องนี้",
    audio_unsupported: "เบราว์เซอร์ของคุณไม่รองรับการเล่นเสียง",
    processed: "ประมวลผลเมื่อ",
    empty_state: "ไม่พบไฟล์ PDF ในโฟลเดอร์ KB เพิ่มไฟล์ PDF แล้วรีเฟรช!",
    error_title: "การเชื่อมต่อผิดพลาด",
    error_body: "ไม่สามารถโหลดการ์ดความรู้จากเซิร์ฟเวอร์ได้",
    retry: "ลองอีกครั้ง",
    checking_for_new_files: "กำลังตรวจสอบไฟล์ใหม่...",
    no_new_files: "ไม่พบไฟล์ใหม่",
    refresh_failed: "เกิดข้อผิดพลาดในการรีเฟรชไฟล์",
};

pub fn labels(lang: Language) -> &'static Labels {
    match lang {
        Language::En => &EN,
        Language::Th => &TH,
    }
}

pub(crate) fn files_loaded(lang: Language, count: usize) -> String {
    match lang {
        Language::En => format!("{count} new file(s) loaded!"),
        Language::Th => format!("โหลดไฟล์ใหม่ {count} ไฟล์!"),
    }
}

pub(crate) fn files_detected(lang: Language, count: usize) -> String {
    match lang {
        Language::En => format!("{count} new file(s) detected!"),
        Language::Th => format!("พบไฟล์ใหม่ {count} ไฟล์!"),
    }
}

pub(crate) fn files_removed(lang: Language, count: usize) -> String {
    match lang {
        Language::En => format!("{count} file(s) removed"),
        Language::Th => format!("ไฟล์ถูกลบ {count} ไฟล์"),
    }
}
