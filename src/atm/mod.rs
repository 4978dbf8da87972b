//! ATM keypad front end
//!
//! [`AtmSession`] models the screen and keypad of the ATM as a state
//! machine over [`AtmService`](crate::services::AtmService). It knows
//! nothing about terminals: the CLI feeds it [`Input`]s and prints the
//! resulting [`Screen`] and [`Notice`]s.

pub mod captcha;
pub mod session;

pub use captcha::{CaptchaSource, RandomCaptcha};
pub use session::{AtmSession, Input, Key, Mode, Notice, Operation, Screen};
