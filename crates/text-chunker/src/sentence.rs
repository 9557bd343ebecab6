use crate::error::Result;
use crate::tokenizer::TokenizerAdapter;

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Split a paragraph after every `.`, `!` or `?` that is followed by
/// whitespace. The whitespace run between two sentences is dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let at_boundary =
            ch.is_whitespace() && prev.is_some_and(|p| SENTENCE_TERMINATORS.contains(&p));
        if !at_boundary {
            prev = Some(ch);
            continue;
        }

        let mut next_start = idx + ch.len_utf8();
        while let Some(&(next_idx, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            next_start = next_idx + next.len_utf8();
            chars.next();
        }

        sentences.push(&text[start..idx]);
        start = next_start;
        prev = None;
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

/// Pack the sentences of an oversized paragraph into sub-chunks of at most
/// `max_tokens`.
///
/// A sentence joins the running sub-chunk while `current + sentence` fits;
/// the running count is always re-read from the tokenizer on the whole
/// sub-chunk. A single sentence above the budget becomes its own sub-chunk.
pub fn split_long_paragraph<T>(
    paragraph: &str,
    max_tokens: usize,
    tokenizer: &T,
) -> Result<Vec<String>>
where
    T: TokenizerAdapter + ?Sized,
{
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_tokens = 0;

    for sentence in split_sentences(paragraph) {
        let sentence_tokens = tokenizer.count_tokens(sentence)?;

        if current_tokens + sentence_tokens <= max_tokens {
            if current.is_empty() {
                current.push_str(sentence);
                current_tokens = sentence_tokens;
            } else {
                current.push(' ');
                current.push_str(sentence);
                current_tokens = tokenizer.count_tokens(&current)?;
            }
            continue;
        }

        if sentence_tokens > max_tokens {
            log::debug!(
                "sentence of {sentence_tokens} tokens exceeds max_tokens={max_tokens}; kept whole"
            );
        }
        push_trimmed(&mut chunks, &current);
        current = sentence.to_string();
        current_tokens = sentence_tokens;
    }

    push_trimmed(&mut chunks, &current);
    Ok(chunks)
}

fn push_trimmed(chunks: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
