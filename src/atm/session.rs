//! Keypad state machine
//!
//! The ATM screen is always in exactly one [`Mode`]. Keys and operation
//! buttons move it between modes; business rules are delegated to
//! [`AtmService`]. Rule violations come back as a [`Notice`] for the user
//! while storage failures are returned as errors.

use std::fmt;

use crate::crypto::SecureString;
use crate::display::statement_lines;
use crate::error::{KioskError, KioskResult};
use crate::models::{Money, PIN_LENGTH};
use crate::services::AtmService;

use super::captcha::CaptchaSource;

/// What the keypad is currently collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    PinEntry,
    Menu,
    Withdraw,
    Deposit,
    ChangePinCurrent,
    ChangePinNew,
    ChangePinConfirm,
    Captcha,
    Exited,
}

/// Keypad keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Clear,
    Enter,
}

/// Operation buttons beside the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Balance,
    Withdraw,
    Deposit,
    ChangePin,
    Statement,
    Exit,
}

/// A single press on the keypad or an operation button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(Key),
    Operation(Operation),
}

impl Input {
    /// Parse one line typed at the terminal
    ///
    /// A run of digits presses each digit followed by Enter; words select a
    /// key or an operation. Returns `None` for anything unrecognised.
    pub fn parse_line(line: &str) -> Option<Vec<Input>> {
        let line = line.trim();
        if !line.is_empty() && line.chars().all(|c| c.is_ascii_digit()) {
            let mut inputs: Vec<Input> = line
                .bytes()
                .map(|b| Input::Key(Key::Digit(b - b'0')))
                .collect();
            inputs.push(Input::Key(Key::Enter));
            return Some(inputs);
        }

        let input = match line.to_lowercase().as_str() {
            "" | "enter" | "e" => Input::Key(Key::Enter),
            "clear" | "c" => Input::Key(Key::Clear),
            "balance" | "b" => Input::Operation(Operation::Balance),
            "withdraw" | "w" => Input::Operation(Operation::Withdraw),
            "deposit" | "d" => Input::Operation(Operation::Deposit),
            "pin" | "change-pin" | "p" => Input::Operation(Operation::ChangePin),
            "statement" | "s" => Input::Operation(Operation::Statement),
            "exit" | "quit" | "q" | "x" => Input::Operation(Operation::Exit),
            _ => return None,
        };
        Some(vec![input])
    }
}

/// A one-off message shown next to the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Info(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Error(msg) => write!(f, "Error: {}", msg),
            Notice::Info(msg) => write!(f, "{}", msg),
        }
    }
}

/// Text currently shown on the ATM display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub lines: Vec<String>,
}

impl Screen {
    fn show(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines = lines.into_iter().collect();
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// One customer's visit to the ATM
pub struct AtmSession<'a, C: CaptchaSource> {
    atm: AtmService<'a>,
    captcha: C,
    mode: Mode,
    screen: Screen,
    /// Digits typed in the current mode
    entry: SecureString,
    /// New PIN held between the confirm and CAPTCHA steps
    new_pin: SecureString,
    captcha_code: String,
}

impl<'a, C: CaptchaSource> AtmSession<'a, C> {
    pub fn new(atm: AtmService<'a>, captcha: C) -> Self {
        let mut session = Self {
            atm,
            captcha,
            mode: Mode::PinEntry,
            screen: Screen::default(),
            entry: SecureString::default(),
            new_pin: SecureString::default(),
            captcha_code: String::new(),
        };
        session.enter_pin_mode();
        session
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn is_finished(&self) -> bool {
        self.mode == Mode::Exited
    }

    pub fn handle(&mut self, input: Input) -> KioskResult<Option<Notice>> {
        match input {
            Input::Key(key) => self.press(key),
            Input::Operation(op) => self.select(op),
        }
    }

    /// Press a keypad key
    pub fn press(&mut self, key: Key) -> KioskResult<Option<Notice>> {
        match self.mode {
            Mode::Exited | Mode::Menu => Ok(None),
            Mode::Withdraw | Mode::Deposit => self.amount_key(key),
            Mode::PinEntry
            | Mode::ChangePinCurrent
            | Mode::ChangePinNew
            | Mode::ChangePinConfirm
            | Mode::Captcha => self.code_key(key),
        }
    }

    /// Press an operation button
    ///
    /// Operations work in every mode after login and abandon whatever was
    /// in progress, including a half-finished PIN change. Exit works
    /// everywhere.
    pub fn select(&mut self, op: Operation) -> KioskResult<Option<Notice>> {
        if self.mode == Mode::Exited {
            return Ok(None);
        }
        if op == Operation::Exit {
            self.exit();
            return Ok(None);
        }
        if self.mode == Mode::PinEntry {
            return Ok(None);
        }
        self.entry.clear();
        self.new_pin.clear();
        self.captcha_code.clear();

        match op {
            Operation::Balance => {
                let balance = self.atm.balance()?;
                self.mode = Mode::Menu;
                self.screen
                    .show([format!("Current Balance: {}", balance.format_whole())]);
            }
            Operation::Withdraw => self.enter_amount_mode(Mode::Withdraw),
            Operation::Deposit => self.enter_amount_mode(Mode::Deposit),
            Operation::ChangePin => {
                self.mode = Mode::ChangePinCurrent;
                let prompt = self.prompt();
                self.screen.show([prompt]);
            }
            Operation::Statement => self.show_statement()?,
            Operation::Exit => {}
        }
        Ok(None)
    }

    fn amount_key(&mut self, key: Key) -> KioskResult<Option<Notice>> {
        match key {
            Key::Digit(d) => {
                self.entry.push(digit_char(d));
                let shown = self.entry.as_str().to_string();
                self.screen.push(shown);
                Ok(None)
            }
            Key::Clear => {
                self.enter_amount_mode(self.mode);
                Ok(None)
            }
            Key::Enter if self.entry.is_empty() => Ok(None),
            Key::Enter => {
                let amount = match parse_amount(&self.entry) {
                    Ok(amount) => amount,
                    Err(err) => return notice(err),
                };
                let result = if self.mode == Mode::Withdraw {
                    self.atm.withdraw(amount).map(|balance| ("Withdrew", balance))
                } else {
                    self.atm.deposit(amount).map(|balance| ("Deposited", balance))
                };
                match result {
                    Ok((verb, balance)) => {
                        self.entry.clear();
                        self.mode = Mode::Menu;
                        self.screen.show([
                            format!("{}: {}", verb, amount.format_whole()),
                            format!("New balance: {}", balance.format_whole()),
                        ]);
                        Ok(None)
                    }
                    // Buffer and mode are kept so the user can correct the amount
                    Err(err) => notice(err),
                }
            }
        }
    }

    fn code_key(&mut self, key: Key) -> KioskResult<Option<Notice>> {
        match key {
            Key::Digit(d) => {
                if self.entry.len() < PIN_LENGTH {
                    self.entry.push(digit_char(d));
                    let shown = if self.mode == Mode::Captcha {
                        self.entry.as_str().to_string()
                    } else {
                        "*".repeat(self.entry.len())
                    };
                    self.screen.push(shown);
                }
                Ok(None)
            }
            Key::Clear => {
                self.entry.clear();
                let prompt = self.prompt();
                self.screen.show([prompt]);
                Ok(None)
            }
            Key::Enter => self.submit_code(),
        }
    }

    fn submit_code(&mut self) -> KioskResult<Option<Notice>> {
        let entered = std::mem::take(&mut self.entry);

        match self.mode {
            Mode::PinEntry => match self.atm.verify_pin(&entered) {
                Ok(()) => {
                    self.enter_menu();
                    Ok(None)
                }
                Err(err) => {
                    self.enter_pin_mode();
                    notice(err)
                }
            },
            Mode::ChangePinCurrent => match self.atm.verify_current_pin(&entered) {
                Ok(()) => {
                    self.mode = Mode::ChangePinNew;
                    let prompt = self.prompt();
                    self.screen.show([prompt]);
                    Ok(None)
                }
                Err(err) => self.abort_to_menu(err),
            },
            Mode::ChangePinNew => {
                if entered.len() != PIN_LENGTH {
                    return self.abort_to_menu(KioskError::Validation(
                        "PIN must be 4 digits".into(),
                    ));
                }
                self.new_pin = entered;
                self.mode = Mode::ChangePinConfirm;
                let prompt = self.prompt();
                self.screen.show([prompt]);
                Ok(None)
            }
            Mode::ChangePinConfirm => match self.atm.check_new_pin(&self.new_pin, &entered) {
                Ok(()) => {
                    self.captcha_code = self.captcha.next_code();
                    self.mode = Mode::Captcha;
                    let prompt = self.prompt();
                    self.screen.show([prompt]);
                    Ok(None)
                }
                Err(err) => self.abort_to_menu(err),
            },
            Mode::Captcha => {
                if entered.as_str() != self.captcha_code {
                    return self.abort_to_menu(KioskError::Authentication(
                        "Incorrect CAPTCHA".into(),
                    ));
                }
                let new_pin = std::mem::take(&mut self.new_pin);
                self.atm.set_pin(&new_pin)?;
                self.enter_menu();
                Ok(Some(Notice::Info("PIN changed successfully!".into())))
            }
            Mode::Menu | Mode::Withdraw | Mode::Deposit | Mode::Exited => Ok(None),
        }
    }

    fn show_statement(&mut self) -> KioskResult<()> {
        let statement = self.atm.statement()?;
        self.mode = Mode::Menu;

        let lines = statement_lines(&statement, self.atm.rules().statement_size);
        self.screen.show(lines);
        Ok(())
    }

    fn abort_to_menu(&mut self, err: KioskError) -> KioskResult<Option<Notice>> {
        self.new_pin.clear();
        self.captcha_code.clear();
        self.enter_menu();
        notice(err)
    }

    fn enter_pin_mode(&mut self) {
        self.entry.clear();
        self.mode = Mode::PinEntry;
        let prompt = self.prompt();
        self.screen.show([prompt]);
    }

    fn enter_menu(&mut self) {
        self.entry.clear();
        self.mode = Mode::Menu;
        let prompt = self.prompt();
        self.screen.show([prompt]);
    }

    fn enter_amount_mode(&mut self, mode: Mode) {
        self.entry.clear();
        self.mode = mode;
        let prompt = self.prompt();
        self.screen.show([prompt]);
    }

    fn exit(&mut self) {
        self.entry.clear();
        self.new_pin.clear();
        self.mode = Mode::Exited;
        self.screen.show([
            "Thank you for using".to_string(),
            "our ATM service!".to_string(),
        ]);
    }

    fn prompt(&self) -> String {
        match self.mode {
            Mode::PinEntry => "Please enter your 4-digit PIN:".into(),
            Mode::Menu => "Select an operation:".into(),
            Mode::Withdraw => "Enter withdrawal amount:".into(),
            Mode::Deposit => "Enter deposit amount:".into(),
            Mode::ChangePinCurrent => "Enter current PIN:".into(),
            Mode::ChangePinNew => "Enter new 4-digit PIN:".into(),
            Mode::ChangePinConfirm => "Confirm new 4-digit PIN:".into(),
            Mode::Captcha => format!("Enter this CAPTCHA: {}", self.captcha_code),
            Mode::Exited => String::new(),
        }
    }
}

fn digit_char(d: u8) -> char {
    char::from(b'0' + d.min(9))
}

fn parse_amount(digits: &str) -> KioskResult<Money> {
    digits
        .parse::<i64>()
        .ok()
        .and_then(|dollars| dollars.checked_mul(100))
        .map(Money::from_cents)
        .ok_or_else(|| KioskError::Validation("Amount is too large".into()))
}

/// Turn a rule violation into a notice; anything else is a real failure
fn notice(err: KioskError) -> KioskResult<Option<Notice>> {
    match err {
        KioskError::Validation(_)
        | KioskError::Authentication(_)
        | KioskError::InsufficientFunds { .. } => Ok(Some(Notice::Error(err.notice()))),
        other => Err(other),
    }
}
