/// Type of frame.
#[non_exhaustive]
#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    /// Sent by client to initiate protocol processing.
    SETUP,
    /// Sent by Responder to grant the ability to send requests.
    LEASE,
    /// Connection keepalive.
    KEEPALIVE,
    /// Request single response.
    REQUEST_RESPONSE,
    /// A single one-way message.
    REQUEST_FNF,
    /// Request a completable stream.
    REQUEST_STREAM,
    /// Request a completable stream in both directions.
    REQUEST_CHANNEL,
    /// Request N more items with Reactive Streams semantics.
    REQUEST_N,
    /// Cancel outstanding request.
    CANCEL,
    /// Payload on a stream. For example, response to a request, or message on a channel.
    PAYLOAD,
    /// Error at connection or application level.
    ERROR,
    /// Asynchronous Metadata frame
    METADATA_PUSH,
    /// Replaces SETUP for Resuming Operation (optional)
    RESUME,
    /// Sent in response to a RESUME if resuming operation possible (optional)
    RESUME_OK,
    /// Used To Extend more frame types as well as extensions.
    EXT,
}

impl FrameType {
    /// Specify the frame type with the raw value described in the [`Frame Types`] section of the
    /// RSocket protocol spec. This will return `None` if the given raw value is unrecognized.
    ///
    /// [`Frame Types`]: https://rsocket.io/about/protocol/#frame-types
    pub fn from_value(val: u16) -> Option<FrameType> {
        match val {
            0x01 => Some(FrameType::SETUP),
            0x02 => Some(FrameType::LEASE),
            0x03 => Some(FrameType::KEEPALIVE),
            0x04 => Some(FrameType::REQUEST_RESPONSE),
            0x05 => Some(FrameType::REQUEST_FNF),
            0x06 => Some(FrameType::REQUEST_STREAM),
            0x07 => Some(FrameType::REQUEST_CHANNEL),
            0x08 => Some(FrameType::REQUEST_N),
            0x09 => Some(FrameType::CANCEL),
            0x0A => Some(FrameType::PAYLOAD),
            0x0B => Some(FrameType::ERROR),
            0x0C => Some(FrameType::METADATA_PUSH),
            0x0D => Some(FrameType::RESUME),
            0x0E => Some(FrameType::RESUME_OK),
            0x3F => Some(FrameType::EXT),
            _ => None,
        }
    }

    /// Convert from underlying bit representation, if the bit representation contains a valid
    /// frame type.
    ///
    /// In other words, the higher 6-bit of the given bit pattern will convert to a [`FrameType`].
    ///
    /// ```text
    /// 0                   1                   2                   3
    /// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
    /// +-----------+-+-+-+-+-----------+-------------------------------+
    /// |Frame Type |I|M|     Flags     |
    /// +-----------+-+-+-+-+-----------+-------------------------------+
    /// ```
    pub fn from_bits(bits: u16) -> Option<FrameType> {
        match bits >> 10 {
            0x01 => Some(FrameType::SETUP),
            0x02 => Some(FrameType::LEASE),
            0x03 => Some(FrameType::KEEPALIVE),
            0x04 => Some(FrameType::REQUEST_RESPONSE),
            0x05 => Some(FrameType::REQUEST_FNF),
            0x06 => Some(FrameType::REQUEST_STREAM),
            0x07 => Some(FrameType::REQUEST_CHANNEL),
            0x08 => Some(FrameType::REQUEST_N),
            0x09 => Some(FrameType::CANCEL),
            0x0A => Some(FrameType::PAYLOAD),
            0x0B => Some(FrameType::ERROR),
            0x0C => Some(FrameType::METADATA_PUSH),
            0x0D => Some(FrameType::RESUME),
            0x0E => Some(FrameType::RESUME_OK),
            0x3F => Some(FrameType::EXT),
            _ => None,
        }
    }

    /// Returns the corresponding raw value of this frame type. The raw value is described in the
    /// [`Frame Types`] section of the RSocket protocol spec.
    ///
    /// [`Frame Types`]: https://rsocket.io/about/protocol/#frame-types
    pub fn value(self) -> u16 {
        match self {
            FrameType::SETUP => 0x01,
            FrameType::LEASE => 0x02,
            FrameType::KEEPALIVE => 0x03,
            FrameType::REQUEST_RESPONSE => 0x04,
            FrameType::REQUEST_FNF => 0x05,
            FrameType::REQUEST_STREAM => 0x06,
            FrameType::REQUEST_CHANNEL => 0x07,
            FrameType::REQUEST_N => 0x08,
            FrameType::CANCEL => 0x09,
            FrameType::PAYLOAD => 0x0A,
            FrameType::ERROR => 0x0B,
            FrameType::METADATA_PUSH => 0x0C,
            FrameType::RESUME => 0x0D,
            FrameType::RESUME_OK => 0x0E,
            FrameType::EXT => 0x3F,
        }
    }

    /// Convert this frame type to a bit representation, with the higher 6-bit of the return value
    /// setting to the raw value of the frame type.
    ///
    /// ```text
    /// 0                   1                   2                   3
    /// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
    /// +-----------+-+-+-+-+-----------+-------------------------------+
    /// |Frame Type |I|M|     Flags     |
    /// +-----------+-+-+-+-+-----------+-------------------------------+
    /// ```
    pub fn bits(self) -> u16 {
        let val = match self {
            FrameType::SETUP => 0x01,
            FrameType::LEASE => 0x02,
            FrameType::KEEPALIVE => 0x03,
            FrameType::REQUEST_RESPONSE => 0x04,
            FrameType::REQUEST_FNF => 0x05,
            FrameType::REQUEST_STREAM => 0x06,
            FrameType::REQUEST_CHANNEL => 0x07,
            FrameType::REQUEST_N => 0x08,
            FrameType::CANCEL => 0x09,
            FrameType::PAYLOAD => 0x0A,
            FrameType::ERROR => 0x0B,
            FrameType::METADATA_PUSH => 0x0C,
            FrameType::RESUME => 0x0D,
            FrameType::RESUME_OK => 0x0E,
            FrameType::EXT => 0x3F,
        };
        val << 10
    }
}

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// Frame header flags: the low 10 bits of the header word.
///
/// This is deliberately not a `bitflags!`-generated type. `bitflags`'s
/// `from_bits_truncate` drops any bit outside the union of named constants,
/// but the wire format only assigns meaning to 5 of the 10 flag bits —
/// truncating against that narrower mask would silently discard the
/// remaining bits on every parse. The protocol requires those bits to
/// survive a decode/encode round-trip untouched even though this crate
/// gives them no name, so `Flags` stores the full 10-bit field and only
/// masks off the frame-type bits above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags(u16);

impl Flags {
    /// Bit width of the flags field; bits above this belong to the frame type.
    const MASK: u16 = 0b11_1111_1111;

    /// The frame can be ignored.
    pub const IGNORE: Flags = Flags(0b01_0000_0000);
    /// Metadata present.
    pub const METADATA: Flags = Flags(0b00_1000_0000);
    /// More fragments follow this fragment.
    pub const FOLLOWS: Flags = Flags(0b00_0100_0000);
    /// Client requests resume capability if possible.
    pub const RESUME: Flags = Flags(0b00_0100_0000);
    /// Respond with KEEPALIVE.
    pub const RESPOND: Flags = Flags(0b00_0100_0000);
    /// Bit to indicate stream completion.
    pub const COMPLETE: Flags = Flags(0b00_0010_0000);
    /// Will honor LEASE.
    pub const LEASE: Flags = Flags(0b00_0010_0000);
    /// Bit to indicate Next (Payload Data and/or Metadata present).
    pub const NEXT: Flags = Flags(0b00_0001_0000);

    /// The empty flag set.
    pub fn empty() -> Self {
        Flags(0)
    }

    /// Builds a `Flags` from the low 10 bits of `bits`. Every bit in that
    /// range is kept, including ones this crate assigns no name to — only
    /// the frame-type bits (10 and above) are masked off.
    pub fn from_bits_truncate(bits: u16) -> Self {
        Flags(bits & Self::MASK)
    }

    /// Returns the raw 10-bit pattern.
    pub fn bits(&self) -> u16 {
        self.0
    }

    /// Returns true if every bit set in `other` is also set in `self`.
    pub fn contains(&self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Flags {
    type Output = Flags;

    fn bitand(self, rhs: Flags) -> Flags {
        Flags(self.0 & rhs.0)
    }
}

impl BitAndAssign for Flags {
    fn bitand_assign(&mut self, rhs: Flags) {
        self.0 &= rhs.0;
    }
}

impl Flags {
    /// Returns true if the Flags have the IGNORE bit set.
    pub fn is_ignore(&self) -> bool {
        self.contains(Flags::IGNORE)
    }

    /// Returns true if the Flags have the METADATA bit set.
    pub fn is_metadata(&self) -> bool {
        self.contains(Flags::METADATA)
    }

    /// Returns true if the Flags have the FOLLOWS bit set.
    pub fn is_follows(&self) -> bool {
        self.contains(Flags::FOLLOWS)
    }

    /// Returns true if the Flags have the RESUME bit set.
    pub fn is_resume(&self) -> bool {
        self.contains(Flags::RESUME)
    }

    /// Returns true if the Flags have the RESPOND bit set.
    pub fn is_respond(&self) -> bool {
        self.contains(Flags::RESPOND)
    }

    /// Returns true if the Flags have the COMPLETE bit set.
    pub fn is_complete(&self) -> bool {
        self.contains(Flags::COMPLETE)
    }

    /// Returns true if the Flags have the LEASE bit set.
    pub fn is_lease(&self) -> bool {
        self.contains(Flags::LEASE)
    }

    /// Returns true if the Flags have the NEXT bit set.
    pub fn is_next(&self) -> bool {
        self.contains(Flags::NEXT)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const RECOGNIZED_TYPES: [u16; 15] = [
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
        0x0C, 0x0D, 0x0E, 0x3F,
    ];

    proptest! {
        /// For every recognized frame type and every possible 10-bit flags
        /// value — including bits this crate assigns no name to — the
        /// packed header word round-trips through `from_bits`/`bits` and the
        /// flags bits survive untouched.
        #[test]
        fn header_word_round_trips(
            type_idx in 0..RECOGNIZED_TYPES.len(),
            flags_bits in 0u16..=0x3FF,
        ) {
            let ty = RECOGNIZED_TYPES[type_idx];
            let word = (ty << 10) | flags_bits;

            let frame_type = FrameType::from_bits(word).unwrap();
            prop_assert_eq!(frame_type.value(), ty);

            let flags = Flags::from_bits_truncate(word);
            prop_assert_eq!(flags.bits(), flags_bits);

            prop_assert_eq!(frame_type.bits() | flags.bits(), word);
        }
    }
}
