/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

/// Resolves a MIPS ABI register name (without the `$`) to its 5-bit number.
///
/// Named registers are matched whole; the single-letter classes take one
/// decimal digit: `$v0-1`, `$a0-3`, `$t0-9`, `$s0-7`, `$k0-1`.
pub fn resolve_register(name: &str) -> Option<u8> {
    match name {
        "zero" => Some(0),
        "at" => Some(1),
        "gp" => Some(28),
        "sp" => Some(29),
        "fp" => Some(30),
        "ra" => Some(31),
        _ => {
            if name.len() != 2 {
                return None;
            }
            let class = name.as_bytes()[0];
            let index = (name.as_bytes()[1] as char).to_digit(10)? as u8;
            match class {
                b'v' if index <= 1 => Some(2 + index),
                b'a' if index <= 3 => Some(4 + index),
                b't' if index <= 7 => Some(8 + index),
                b't' => Some(24 + index - 8),
                b's' if index <= 7 => Some(16 + index),
                b'k' if index <= 1 => Some(26 + index),
                _ => None,
            }
        }
    }
}

/// Parses a numeric literal: `0x` hex, `0b` binary, a leading `0` octal,
/// decimal otherwise, with an optional leading `-`.
pub fn parse_number(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = if let Some(hex) = digits.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = digits.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}
