//! Fixed locators for the stock Anvil login and signup dialogs.
//!
//! Anvil renders its built-in authentication UI with a stable DOM layout and
//! no usable ids or names, so the fields are addressed by structural XPath.
//! The login and signup forms share the dialog, the email/password inputs,
//! and the submit button; signup additionally shows the confirm-password
//! input and is reached through the switch link at the bottom of the login
//! form.

/// Root of the authentication dialog.
pub const DIALOG_ROOT: &str = "/html/body/div[4]/div/div";

/// Email input, shared by the login and signup forms.
pub const EMAIL_INPUT: &str = "/html/body/div[4]/div/div/div[2]/div/ul/li[2]/input";

/// Password input, shared by the login and signup forms.
pub const PASSWORD_INPUT: &str = "/html/body/div[4]/div/div/div[2]/div/ul/li[4]/input";

/// Confirm-password input, present on the signup form only.
pub const CONFIRM_PASSWORD_INPUT: &str = "/html/body/div[4]/div/div/div[2]/div/ul/li[6]/input";

/// Link that switches the dialog from login to signup.
pub const SIGNUP_LINK: &str = "/html/body/div[4]/div/div/div[2]/div/ul/li[7]/a";

/// Submit button, shared by both forms.
pub const SUBMIT_BUTTON: &str = "/html/body/div[4]/div/div/div[3]/button[1]";
