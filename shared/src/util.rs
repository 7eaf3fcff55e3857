/// Normalize a free-form subcategory label to lowercase/underscored ASCII.
///
/// "Vinilo Monomérico" -> "vinilo_monomerico". Non-ASCII letters are
/// transliterated for the small set that shows up in supplier feeds;
/// anything else non-alphanumeric collapses to a single underscore.
pub fn normalize_subcategory(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_underscore = true;
    for c in raw.trim().chars() {
        let mapped = match c {
            'á' | 'à' | 'Á' | 'À' => Some('a'),
            'é' | 'è' | 'É' | 'È' => Some('e'),
            'í' | 'ì' | 'Í' | 'Ì' => Some('i'),
            'ó' | 'ò' | 'Ó' | 'Ò' => Some('o'),
            'ú' | 'ù' | 'Ú' | 'Ù' => Some('u'),
            'ñ' | 'Ñ' => Some('n'),
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            _ => None,
        };
        match mapped {
            Some(c) => {
                out.push(c);
                last_underscore = false;
            }
            None if !last_underscore => {
                out.push('_');
                last_underscore = true;
            }
            None => {}
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}
