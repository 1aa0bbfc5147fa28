use crate::models::{ContentSection, PostDetail};

/// Скорость чтения, слов в минуту.
pub const WORDS_PER_MINUTE: usize = 200;

/// Количество слов в строке: число фрагментов между одиночными пробелами.
///
/// Строка не нормализуется, поэтому `""` даёт 1, а `"a  b"` даёт 3.
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// Суммарное количество слов в заголовках и текстовых блоках разделов.
///
/// Блоки без текста (изображения, embed) слов не добавляют.
pub fn total_words(content: &[ContentSection]) -> usize {
    content
        .iter()
        .map(|section| {
            let body_words: usize = section
                .body
                .iter()
                .filter_map(|block| block.text.as_deref())
                .map(word_count)
                .sum();
            word_count(&section.heading) + body_words
        })
        .sum()
}

/// Оценка времени чтения в целых минутах, с округлением вверх.
///
/// Пустой список разделов даёт 0.
pub fn reading_time_minutes(content: &[ContentSection]) -> usize {
    total_words(content).div_ceil(WORDS_PER_MINUTE)
}

impl PostDetail {
    /// Оценка времени чтения поста в минутах.
    pub fn reading_time(&self) -> usize {
        reading_time_minutes(&self.content)
    }
}
