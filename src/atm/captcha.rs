//! CAPTCHA codes for the PIN change flow

use argon2::password_hash::rand_core::{OsRng, RngCore};

/// Produces the 4-digit code a user must type back before a PIN change
pub trait CaptchaSource {
    fn next_code(&mut self) -> String;
}

/// Codes drawn uniformly from 1000..=9999 using the OS random source
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCaptcha;

impl CaptchaSource for RandomCaptcha {
    fn next_code(&mut self) -> String {
        (1000 + OsRng.next_u32() % 9000).to_string()
    }
}

/// Hands out a fixed sequence of codes, then repeats the last one
#[cfg(test)]
pub(crate) struct FixedCaptcha(pub Vec<&'static str>);

#[cfg(test)]
impl CaptchaSource for FixedCaptcha {
    fn next_code(&mut self) -> String {
        if self.0.len() > 1 {
            self.0.remove(0).to_string()
        } else {
            self.0.first().copied().unwrap_or("1000").to_string()
        }
    }
}
