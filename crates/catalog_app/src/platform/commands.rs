use catalog_core::{EpochMillis, Msg, RangeWindow, SortKey};

/// One line of terminal input, interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Msg(Msg),
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &[&str] = &[
    "commands:",
    "  sort date_desc|views_desc",
    "  range all|1m|6m|1y",
    "  search <text>      (empty text clears the search)",
    "  apply              commit the pending search now",
    "  page <n> | next | prev",
    "  play <row>         open a row of the current page",
    "  help | quit",
];

/// Parses a command line typed at `at_ms`.
pub fn parse_line(line: &str, at_ms: EpochMillis) -> Inbound {
    let trimmed = line.trim();
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "" => Inbound::Msg(Msg::NoOp),
        "sort" => match SortKey::parse(rest) {
            Some(sort_key) => Inbound::Msg(Msg::SortSelected(sort_key)),
            None => Inbound::Unknown(trimmed.to_string()),
        },
        "range" if !rest.is_empty() => {
            Inbound::Msg(Msg::RangeSelected(RangeWindow::from_alias(rest)))
        }
        "search" | "/" => Inbound::Msg(Msg::SearchInput {
            text: rest.to_string(),
            at_ms,
        }),
        "apply" => Inbound::Msg(Msg::SearchCommitted),
        "page" => match rest.parse::<usize>() {
            Ok(page) if page > 0 => Inbound::Msg(Msg::PageSelected(page)),
            _ => Inbound::Unknown(trimmed.to_string()),
        },
        "next" | "n" => Inbound::Msg(Msg::NextPage),
        "prev" | "p" => Inbound::Msg(Msg::PrevPage),
        "play" => match rest.parse::<usize>() {
            Ok(row) if row > 0 => Inbound::Msg(Msg::RecordSelected { index: row - 1 }),
            _ => Inbound::Unknown(trimmed.to_string()),
        },
        "help" | "?" => Inbound::Help,
        "quit" | "q" | "exit" => Inbound::Quit,
        _ => Inbound::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn selections_map_to_messages() {
        assert_eq!(
            parse_line("sort views_desc", 0),
            Inbound::Msg(Msg::SortSelected(SortKey::ViewsDesc))
        );
        assert_eq!(
            parse_line("range 6mo", 0),
            Inbound::Msg(Msg::RangeSelected(RangeWindow::HalfYear))
        );
        assert_eq!(parse_line("page 3", 0), Inbound::Msg(Msg::PageSelected(3)));
        assert_eq!(
            parse_line("play 2", 0),
            Inbound::Msg(Msg::RecordSelected { index: 1 })
        );
    }

    #[test]
    fn search_keeps_inner_spacing_and_timestamp() {
        assert_eq!(
            parse_line("search  stand up ", 42),
            Inbound::Msg(Msg::SearchInput {
                text: "stand up".to_string(),
                at_ms: 42,
            })
        );
        assert_eq!(
            parse_line("search", 7),
            Inbound::Msg(Msg::SearchInput {
                text: String::new(),
                at_ms: 7,
            })
        );
    }

    #[test]
    fn malformed_commands_are_reported() {
        assert_eq!(
            parse_line("sort newest", 0),
            Inbound::Unknown("sort newest".to_string())
        );
        assert_eq!(parse_line("page 0", 0), Inbound::Unknown("page 0".to_string()));
        assert_eq!(parse_line("play x", 0), Inbound::Unknown("play x".to_string()));
        assert_eq!(parse_line("dance", 0), Inbound::Unknown("dance".to_string()));
        assert_eq!(parse_line("  ", 0), Inbound::Msg(Msg::NoOp));
        assert_eq!(parse_line("QUIT", 0), Inbound::Quit);
    }
}
