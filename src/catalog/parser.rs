/// One satellite's entry in the catalog feed, exactly as it appeared in the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSet {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

/// Split catalog text into 3-line element sets (name, line 1, line 2).
///
/// Lines are trimmed and blank lines are dropped before grouping, so a stray
/// empty line in the feed does not shift every following set out of phase.
/// Plain line-by-line grouping would count blank lines as set members. A
/// trailing group with fewer than three lines is dropped. The element lines themselves are not checked
/// here; malformed sets are rejected when they are propagated.
pub fn parse_element_sets(content: &str) -> Vec<ElementSet> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    lines
        .chunks_exact(3)
        .map(|group| ElementSet {
            name: group[0].to_string(),
            line1: group[1].to_string(),
            line2: group[2].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "ISS (ZARYA)             \r
1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992\r
2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008\r
NOT A SATELLITE
garbage line one
garbage line two
";

    #[test]
    fn groups_lines_by_three() {
        let sets = parse_element_sets(FEED);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "ISS (ZARYA)");
        assert!(sets[0].line1.starts_with("1 25544U"));
        assert!(sets[0].line2.starts_with("2 25544 "));
        assert_eq!(sets[1].line1, "garbage line one");
    }

    #[test]
    fn trailing_partial_group_is_dropped() {
        let text = format!("{FEED}DANGLING\n1 00000U");
        assert_eq!(parse_element_sets(&text).len(), 2);
        assert!(parse_element_sets("ONLY A NAME\n").is_empty());
        assert!(parse_element_sets("").is_empty());
    }

    #[test]
    fn blank_lines_do_not_shift_grouping() {
        let text = FEED.replace("NOT A SATELLITE", "\n  \nNOT A SATELLITE");
        assert_eq!(parse_element_sets(&text), parse_element_sets(FEED));
    }

    #[test]
    fn parsing_is_idempotent() {
        assert_eq!(parse_element_sets(FEED), parse_element_sets(FEED));
    }
}
