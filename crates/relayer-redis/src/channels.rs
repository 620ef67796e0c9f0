use alloy_primitives::Address;

/// Market pair channel: lowercased `token/base` hex addresses.
pub fn pair_channel(token: &Address, base: &Address) -> String {
    format!("{token:#x}/{base:#x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_channel_is_lowercase_hex() {
        let token: Address = "0xAbCdEf0123456789aBcDeF0123456789abCDef01"
            .parse()
            .unwrap();
        let base: Address = "0x00000000000000000000000000000000DeaDBeef"
            .parse()
            .unwrap();
        assert_eq!(
            pair_channel(&token, &base),
            "0xabcdef0123456789abcdef0123456789abcdef01/0x00000000000000000000000000000000deadbeef"
        );
    }
}
