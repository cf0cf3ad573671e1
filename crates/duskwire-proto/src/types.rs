//! Typed decode adapters for protocol enums.
//!
//! Higher protocol layers (conferencing, file transfer, group chat) carry
//! these enums on the wire as single unsigned 32-bit fields. Each adapter
//! reads one u32 through the [`Unpacker`] and converts it with a checked
//! lookup; unknown discriminants are rejected rather than mapped to a
//! default, so a newer peer cannot smuggle an unhandled value past an older
//! one. The encode direction lives with the writer side of the protocol.

use crate::{
    errors::{Result, UnpackError},
    unpack::Unpacker,
};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident: $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Convert a wire discriminant to the enum, if known.
            #[must_use]
            pub fn from_u32(value: u32) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// The wire discriminant for this value.
            #[must_use]
            pub fn to_u32(self) -> u32 {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            /// Decode one u32 field and convert it.
            ///
            /// # Errors
            ///
            /// Propagates decode failures and rejects unknown
            /// discriminants with
            /// [`UnpackError::InvalidDiscriminant`].
            pub fn unpack(up: &mut Unpacker<'_>) -> Result<Self> {
                let value = up.read_u32()?;
                Self::from_u32(value)
                    .ok_or(UnpackError::InvalidDiscriminant { kind: $kind, value })
            }
        }
    };
}

wire_enum! {
    /// How a message body should be presented.
    MessageType: "message type" {
        /// Ordinary chat message
        Normal = 0,
        /// Emote-style action message
        Action = 1,
    }
}

wire_enum! {
    /// A peer's self-reported availability.
    UserStatus: "user status" {
        /// Online and available
        Available = 0,
        /// Online but away
        Away = 1,
        /// Online but busy
        Busy = 2,
    }
}

wire_enum! {
    /// Media capabilities of a conference.
    ConferenceType: "conference type" {
        /// Text-only conference
        Text = 0,
        /// Audio/video conference
        Av = 1,
    }
}

wire_enum! {
    /// Control commands for an in-flight file transfer.
    FileControl: "file control" {
        /// Start or resume the transfer
        Resume = 0,
        /// Pause the transfer
        Pause = 1,
        /// Abort the transfer entirely
        Cancel = 2,
    }
}

wire_enum! {
    /// Who may discover and join a group.
    GroupPrivacyState: "group privacy state" {
        /// Group is publicly discoverable
        Public = 0,
        /// Group is invite-only
        Private = 1,
    }
}

wire_enum! {
    /// Who may transmit audio in a group call.
    GroupVoiceState: "group voice state" {
        /// All members may speak
        All = 0,
        /// Moderators and the founder may speak
        Moderator = 1,
        /// Only the founder may speak
        Founder = 2,
    }
}

wire_enum! {
    /// Whether non-moderators may change the group topic.
    GroupTopicLock: "group topic lock" {
        /// Topic changes allowed for all members
        Enabled = 0,
        /// Topic locked to moderators
        Disabled = 1,
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::unpack::unpack;

    #[test]
    fn known_discriminants_round_trip() {
        for control in [FileControl::Resume, FileControl::Pause, FileControl::Cancel] {
            assert_eq!(FileControl::from_u32(control.to_u32()), Some(control));
        }
        assert_eq!(FileControl::from_u32(3), None);
    }

    #[test]
    fn unpack_reads_single_u32_field() {
        // 1 as a positive fixint: minimal-width encoding of the Av variant.
        let decoded = unpack(&hex!("01"), ConferenceType::unpack).unwrap();
        assert_eq!(decoded, ConferenceType::Av);

        // The same value at full uint32 width decodes identically.
        let decoded = unpack(&hex!("ce 00000001"), ConferenceType::unpack).unwrap();
        assert_eq!(decoded, ConferenceType::Av);
    }

    #[test]
    fn unknown_discriminant_is_rejected() {
        let err = unpack(&hex!("cc 2a"), UserStatus::unpack).unwrap_err();
        assert_eq!(err, UnpackError::InvalidDiscriminant { kind: "user status", value: 42 });
    }

    #[test]
    fn truncated_field_propagates_decode_error() {
        let err = unpack(&hex!("ce 0000"), GroupPrivacyState::unpack).unwrap_err();
        assert!(matches!(err, UnpackError::ShortBuffer { .. }));
    }
}
