// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Paragraph-aware text chunking.
//!
//! Splits the knowledge file on blank lines and packs paragraphs into
//! chunks of roughly `chunk_size` characters. Oversized paragraphs are
//! windowed with `overlap` characters carried between windows so a policy
//! sentence never loses its lead-in. All indexing is by `char`, not byte;
//! the knowledge base is largely Arabic.

/// Splits `text` into retrieval chunks.
///
/// `overlap` must be smaller than `chunk_size` (enforced by config
/// validation); violating it here degrades to zero overlap.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chunk_size = chunk_size.max(1);
    let overlap = if overlap >= chunk_size { 0 } else { overlap };

    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        let para_len = paragraph.chars().count();

        if para_len > chunk_size {
            flush(&mut chunks, &mut current);
            window_paragraph(&mut chunks, paragraph, chunk_size, overlap);
            continue;
        }

        if current.chars().count() + para_len > chunk_size {
            flush(&mut chunks, &mut current);
        }
        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(paragraph);
    }

    flush(&mut chunks, &mut current);
    chunks
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    if !current.trim().is_empty() {
        chunks.push(std::mem::take(current).trim().to_string());
    }
}

fn window_paragraph(chunks: &mut Vec<String>, paragraph: &str, chunk_size: usize, overlap: usize) {
    let chars: Vec<char> = paragraph.chars().collect();
    let step = chunk_size - overlap;
    let mut start = 0;
    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let window: String = chars[start..end].iter().collect();
        let trimmed = window.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
        if end == chars.len() {
            break;
        }
        start += step;
    }
}
