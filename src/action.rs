//! Icon and menu actions.
//!
//! An action is written as `prefix: payload`, e.g. `console: say hi` or
//! `give: diamond, 3`. Prefixes are matched case-insensitively against an
//! ordered table, first match wins; text with no known prefix is a command
//! run by the player.

use std::sync::LazyLock;

use regex::Regex;

use crate::attributes::{parse_double, strictly_positive_double};
use crate::catalog::Catalog;
use crate::error::ChestfigError;
use crate::item::ItemReference;
use crate::placeholders::Placeholders;
use crate::text;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    PlayerCommand(String),
    ConsoleCommand(String),
    OpCommand(String),
    OpenMenu(String),
    ChangeServer(String),
    SendMessage(String),
    Broadcast(String),
    GiveItem(ItemReference),
    GiveMoney(f64),
    PlaySound(String),
    DragonBar(String),
}

type ActionFactory = fn(String, &Catalog) -> Result<Action, ChestfigError>;

static ACTIONS_BY_PREFIX: LazyLock<Vec<(Regex, ActionFactory)>> = LazyLock::new(|| {
    let table: [(&str, ActionFactory); 10] = [
        ("console:", |s, _| Ok(Action::ConsoleCommand(s))),
        ("op:", |s, _| Ok(Action::OpCommand(s))),
        ("(open|menu):", |s, _| Ok(Action::OpenMenu(s))),
        // The colon is optional, but the word must end there.
        ("server(:|\\b)", |s, _| Ok(Action::ChangeServer(s))),
        ("tell:", |s, _| Ok(Action::SendMessage(text::add_colors(&s)))),
        ("broadcast:", |s, _| Ok(Action::Broadcast(text::add_colors(&s)))),
        ("give:", |s, materials| {
            ItemReference::parse(&s, true, materials).map(Action::GiveItem)
        }),
        ("give-?money:", |s, _| {
            parse_double(&s)
                .and_then(strictly_positive_double)
                .map(Action::GiveMoney)
        }),
        ("sound:", |s, _| Ok(Action::PlaySound(s))),
        ("dragon-?bar:", |s, _| Ok(Action::DragonBar(text::add_colors(&s)))),
    ];
    table
        .into_iter()
        .filter_map(|(prefix, factory)| match Regex::new(&format!("(?i)^{prefix}")) {
            Ok(regex) => Some((regex, factory)),
            Err(e) => {
                log::error!("Invalid action prefix {prefix:?}: {e}");
                None
            }
        })
        .collect()
});

impl Action {
    /// Parse one action. The payload goes through `placeholders` before it is
    /// interpreted.
    pub fn parse(
        input: &str,
        placeholders: &Placeholders,
        materials: &Catalog,
    ) -> Result<Self, ChestfigError> {
        for (regex, factory) in ACTIONS_BY_PREFIX.iter() {
            if let Some(found) = regex.find(input) {
                let payload = input[found.end()..].trim();
                return factory(placeholders.replace_all(payload), materials);
            }
        }
        Ok(Action::PlayerCommand(placeholders.replace_all(input)))
    }

    /// Parse every action in `inputs`. Invalid ones are handed to `on_error`
    /// together with the raw text and left out.
    pub fn parse_all<I, S>(
        inputs: I,
        placeholders: &Placeholders,
        materials: &Catalog,
        mut on_error: impl FnMut(&str, ChestfigError),
    ) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut actions = Vec::new();
        for input in inputs {
            let input = input.as_ref();
            match Action::parse(input, placeholders, materials) {
                Ok(action) => actions.push(action),
                Err(e) => on_error(input, e),
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalogs;

    fn parse(input: &str) -> Result<Action, ChestfigError> {
        Action::parse(input, &Placeholders::new(), &Catalogs::default().materials)
    }

    #[test]
    fn prefixes_are_case_insensitive() {
        assert_eq!(
            parse("CONSOLE: say hi").unwrap(),
            Action::ConsoleCommand("say hi".into())
        );
        assert_eq!(parse("Op:gamemode 1").unwrap(), Action::OpCommand("gamemode 1".into()));
    }

    #[test]
    fn alternative_spellings() {
        assert_eq!(parse("menu: shop").unwrap(), Action::OpenMenu("shop".into()));
        assert_eq!(parse("open:shop").unwrap(), Action::OpenMenu("shop".into()));
        assert_eq!(parse("server lobby").unwrap(), Action::ChangeServer("lobby".into()));
        assert_eq!(parse("givemoney: 10").unwrap(), Action::GiveMoney(10.0));
        assert_eq!(parse("give-money: 2.5").unwrap(), Action::GiveMoney(2.5));
        assert_eq!(parse("dragonbar: hi").unwrap(), Action::DragonBar("hi".into()));
    }

    #[test]
    fn every_prefix_compiles() {
        assert_eq!(ACTIONS_BY_PREFIX.len(), 10);
    }

    #[test]
    fn server_prefix_needs_a_word_boundary() {
        assert_eq!(parse("server:hub").unwrap(), Action::ChangeServer("hub".into()));
        assert_eq!(
            parse("serverlist").unwrap(),
            Action::PlayerCommand("serverlist".into())
        );
    }

    #[test]
    fn unprefixed_text_is_a_player_command() {
        assert_eq!(parse("spawn").unwrap(), Action::PlayerCommand("spawn".into()));
        // "say" is not "server", the prefix must match at the start.
        assert_eq!(
            parse("say server: x").unwrap(),
            Action::PlayerCommand("say server: x".into())
        );
    }

    #[test]
    fn messages_get_colors() {
        assert_eq!(
            parse("tell: &aWelcome").unwrap(),
            Action::SendMessage("§aWelcome".into())
        );
    }

    #[test]
    fn give_parses_item_reference() {
        match parse("give: wool:5, 3").unwrap() {
            Action::GiveItem(item) => {
                assert_eq!(item.material, "WOOL");
                assert_eq!(item.amount, 3);
            }
            other => panic!("Expected GiveItem, got: {other:?}"),
        }
        assert!(parse("give: air").is_err());
        assert!(parse("give-money: -4").is_err());
        assert!(parse("give-money: lots").is_err());
    }

    #[test]
    fn payload_uses_placeholders() {
        let placeholders: Placeholders = [("{hub}", "lobby-1")].into_iter().collect();
        let action =
            Action::parse("server: {hub}", &placeholders, &Catalogs::default().materials).unwrap();
        assert_eq!(action, Action::ChangeServer("lobby-1".into()));
    }

    #[test]
    fn parse_all_skips_invalid() {
        let mut failed = Vec::new();
        let actions = Action::parse_all(
            ["spawn", "give-money: 0", "console: heal"],
            &Placeholders::new(),
            &Catalogs::default().materials,
            |input, _| failed.push(input.to_string()),
        );
        assert_eq!(actions.len(), 2);
        assert_eq!(failed, vec!["give-money: 0"]);
    }
}
