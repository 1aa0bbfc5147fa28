use chrono::{DateTime, Locale, Utc};

use crate::models::{PostDetail, PostSummary};

/// Формат даты для отображения: `25 mar 2021`.
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// Локаль, в которой выводятся названия месяцев.
pub const DISPLAY_LOCALE: Locale = Locale::pt_BR;

/// Форматирует дату публикации для отображения. Отсутствующая дата даёт
/// пустую строку.
pub fn format_display_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(|date| {
        date.format_localized(DISPLAY_DATE_FORMAT, DISPLAY_LOCALE)
            .to_string()
    })
    .unwrap_or_default()
}

impl PostSummary {
    /// Дата публикации в формате для отображения.
    pub fn display_date(&self) -> String {
        format_display_date(self.first_publication_date.as_ref())
    }
}

impl PostDetail {
    /// Дата публикации в формате для отображения.
    pub fn display_date(&self) -> String {
        format_display_date(self.first_publication_date.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn formats_day_abbreviated_month_and_year() {
        let date = Utc.with_ymd_and_hms(2021, 3, 5, 19, 25, 28).unwrap();
        assert_eq!(format_display_date(Some(&date)), "05 mar 2021");
    }

    #[test]
    fn uses_portuguese_month_names() {
        let date = Utc.with_ymd_and_hms(2021, 2, 15, 0, 0, 0).unwrap();
        assert_eq!(format_display_date(Some(&date)), "15 fev 2021");
    }

    #[test]
    fn missing_date_formats_as_empty() {
        assert_eq!(format_display_date(None), "");
    }

    #[test]
    fn summary_display_date_does_not_touch_raw_value() {
        let date = Utc.with_ymd_and_hms(2021, 4, 19, 12, 0, 0).unwrap();
        let summary = PostSummary {
            uid: "a".to_string(),
            first_publication_date: Some(date),
            title: "t".to_string(),
            subtitle: "s".to_string(),
            author: "a".to_string(),
        };

        assert_eq!(summary.display_date(), "19 abr 2021");
        assert_eq!(summary.first_publication_date, Some(date));
    }
}
