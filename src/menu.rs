use teloxide_core::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

pub const NEXT_TOKEN: &str = "Next";
pub const BACK_TOKEN: &str = "Back";
const TUTORIAL_LABEL: &str = "Tutorial";

const FIRST_MENU_TEXT: &str = "<b>Menu 1</b>\n\nA beautiful menu with a shiny inline button.";
const SECOND_MENU_TEXT: &str =
    "<b>Menu 2</b>\n\nA better menu with even more shiny inline buttons.";

#[derive(Debug, Clone, PartialEq)]
pub enum Button {
    Callback { label: String, token: String },
    Link { label: String, url: Url },
}

impl Button {
    fn callback(token: &str) -> Self {
        Button::Callback {
            label: token.to_owned(),
            token: token.to_owned(),
        }
    }
}

impl From<&Button> for InlineKeyboardButton {
    fn from(button: &Button) -> Self {
        match button {
            Button::Callback { label, token } => {
                InlineKeyboardButton::callback(label.clone(), token.clone())
            }
            Button::Link { label, url } => InlineKeyboardButton::url(label.clone(), url.clone()),
        }
    }
}

/// Static HTML text with rows of inline buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuScreen {
    pub text: &'static str,
    pub rows: Vec<Vec<Button>>,
}

impl MenuScreen {
    pub fn keyboard(&self) -> InlineKeyboardMarkup {
        make_keyboard(&self.rows)
    }
}

fn make_keyboard(rows: &[Vec<Button>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        rows.iter()
            .map(|row| row.iter().map(InlineKeyboardButton::from).collect::<Vec<_>>()),
    )
}

/// The two screens, linked by the `Next` and `Back` callback tokens.
#[derive(Debug, Clone)]
pub struct Menus {
    pub first: MenuScreen,
    pub second: MenuScreen,
}

impl Menus {
    pub fn new(tutorial_url: Url) -> Self {
        Self {
            first: MenuScreen {
                text: FIRST_MENU_TEXT,
                rows: vec![vec![Button::callback(NEXT_TOKEN)]],
            },
            second: MenuScreen {
                text: SECOND_MENU_TEXT,
                rows: vec![
                    vec![Button::callback(BACK_TOKEN)],
                    vec![Button::Link {
                        label: TUTORIAL_LABEL.to_owned(),
                        url: tutorial_url,
                    }],
                ],
            },
        }
    }

    /// Screen a callback token navigates to. `None` for unknown tokens.
    pub fn navigate(&self, token: &str) -> Option<&MenuScreen> {
        match token {
            NEXT_TOKEN => Some(&self.second),
            BACK_TOKEN => Some(&self.first),
            _ => None,
        }
    }
}
