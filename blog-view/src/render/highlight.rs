use regex::RegexBuilder;

/// 高亮查询词：逐个词独立替换，长度不超过 1 的词忽略
///
/// `text` 和 `query` 都应已转义。命中只会整体包住转义产生的实体，不会切开
/// `&amp;` 之类的实体；后面的词在已经插入标记的文本上匹配，可能命中前一个词的
/// `<mark>` 标记本身。
pub fn highlight(text: &str, query: &str) -> String {
    let mut highlighted = text.to_string();

    for term in query.trim().split(' ').filter(|term| term.chars().count() > 1) {
        let pattern = match RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => pattern,
            Err(_) => continue,
        };

        let entities = entity_spans(&highlighted);
        let mut marked = String::with_capacity(highlighted.len());
        let mut last = 0;
        for found in pattern.find_iter(&highlighted) {
            if splits_entity(found.start(), found.end(), &entities) {
                continue;
            }
            marked.push_str(&highlighted[last..found.start()]);
            marked.push_str("<mark>");
            marked.push_str(found.as_str());
            marked.push_str("</mark>");
            last = found.end();
        }
        marked.push_str(&highlighted[last..]);
        highlighted = marked;
    }

    highlighted
}

/// 转义文本中每个 `&` 到其后第一个 `;` 的区间
fn entity_spans(text: &str) -> Vec<(usize, usize)> {
    text.match_indices('&')
        .filter_map(|(start, _)| text[start..].find(';').map(|end| (start, start + end + 1)))
        .collect()
}

/// 命中区间与某个实体部分重叠
fn splits_entity(start: usize, end: usize, entities: &[(usize, usize)]) -> bool {
    entities
        .iter()
        .any(|&(from, to)| from < end && start < to && !(start <= from && to <= end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_returns_input_unchanged() {
        assert_eq!(highlight("Local SEO guide", ""), "Local SEO guide");
        assert_eq!(highlight("Local SEO guide", "   "), "Local SEO guide");
    }

    #[test]
    fn wraps_case_insensitive_matches_keeping_original_case() {
        assert_eq!(
            highlight("SEO tips for seo teams", "seo"),
            "<mark>SEO</mark> tips for <mark>seo</mark> teams"
        );
    }

    #[test]
    fn single_character_terms_are_ignored() {
        assert_eq!(highlight("a b c", "a b"), "a b c");
    }

    #[test]
    fn regex_characters_are_literal() {
        assert_eq!(highlight("Price (USD)", "(usd)"), "Price <mark>(USD)</mark>");
    }

    #[test]
    fn matches_never_split_escaped_entities() {
        assert_eq!(
            highlight("Amplify Q&amp;A Sessions", "amp"),
            "<mark>Amp</mark>lify Q&amp;A Sessions"
        );
        assert_eq!(highlight("a &lt; b &gt; c", "lt gt"), "a &lt; b &gt; c");
        assert_eq!(highlight("Don&#39;t stop", "39"), "Don&#39;t stop");
    }

    #[test]
    fn literal_entity_text_can_still_match() {
        assert_eq!(
            highlight("Write &amp;amp; safely", "amp"),
            "Write &amp;<mark>amp</mark>; safely"
        );
    }

    #[test]
    fn escaped_query_can_cover_a_whole_entity() {
        assert_eq!(
            highlight("Amplify Q&amp;A Sessions", "q&amp;a"),
            "Amplify <mark>Q&amp;A</mark> Sessions"
        );
    }

    #[test]
    fn later_terms_can_match_inside_earlier_markup() {
        assert_eq!(
            highlight("mark", "mark ar"),
            "<m<mark>ar</mark>k>m<mark>ar</mark>k</m<mark>ar</mark>k>"
        );
    }
}
