use teloxide_core::types::MessageEntity;

/// Uppercases `text` and moves every entity so it still covers the same characters.
///
/// Entity offsets are in UTF-16 code units. Uppercasing can change the length of a
/// character (`ß` becomes `SS`), so offsets can't be reused as-is.
pub fn scream(text: &str, entities: &[MessageEntity]) -> (String, Vec<MessageEntity>) {
    let mut screamed = String::with_capacity(text.len());
    // positions[i] is where UTF-16 offset `i` of `text` lands in `screamed`.
    let mut positions = Vec::with_capacity(text.len() + 1);
    let mut screamed_len = 0;

    for ch in text.chars() {
        // Offsets pointing into the middle of a surrogate pair snap to the char start.
        positions.extend(std::iter::repeat_n(screamed_len, ch.len_utf16()));
        for upper in ch.to_uppercase() {
            screamed.push(upper);
            screamed_len += upper.len_utf16();
        }
    }
    positions.push(screamed_len);

    let last = positions.len() - 1;
    let remap = |offset: usize| positions[offset.min(last)];

    let entities = entities
        .iter()
        .map(|entity| {
            let start = remap(entity.offset);
            let end = remap(entity.offset.saturating_add(entity.length));
            MessageEntity {
                kind: entity.kind.clone(),
                offset: start,
                length: end - start,
            }
        })
        .collect();

    (screamed, entities)
}
