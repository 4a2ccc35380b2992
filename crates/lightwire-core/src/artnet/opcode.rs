/// 16-bit packet type codes, transmitted low byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    Poll,
    PollReply,
    Output,
    Sync,
    Address,
    Input,
    TodRequest,
    TodData,
    TodControl,
    Rdm,
    RdmSub,
    Timecode,
    Trigger,
    IpProg,
    IpProgReply,
}

impl OpCode {
    pub fn value(self) -> u16 {
        match self {
            OpCode::Poll => 0x2000,
            OpCode::PollReply => 0x2100,
            OpCode::Output => 0x5000,
            OpCode::Sync => 0x5200,
            OpCode::Address => 0x6000,
            OpCode::Input => 0x7000,
            OpCode::TodRequest => 0x8000,
            OpCode::TodData => 0x8100,
            OpCode::TodControl => 0x8200,
            OpCode::Rdm => 0x8300,
            OpCode::RdmSub => 0x8400,
            OpCode::Timecode => 0x9700,
            OpCode::Trigger => 0x9900,
            OpCode::IpProg => 0xf800,
            OpCode::IpProgReply => 0xf900,
        }
    }

    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x2000 => Some(OpCode::Poll),
            0x2100 => Some(OpCode::PollReply),
            0x5000 => Some(OpCode::Output),
            0x5200 => Some(OpCode::Sync),
            0x6000 => Some(OpCode::Address),
            0x7000 => Some(OpCode::Input),
            0x8000 => Some(OpCode::TodRequest),
            0x8100 => Some(OpCode::TodData),
            0x8200 => Some(OpCode::TodControl),
            0x8300 => Some(OpCode::Rdm),
            0x8400 => Some(OpCode::RdmSub),
            0x9700 => Some(OpCode::Timecode),
            0x9900 => Some(OpCode::Trigger),
            0xf800 => Some(OpCode::IpProg),
            0xf900 => Some(OpCode::IpProgReply),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OpCode;

    #[test]
    fn value_round_trips() {
        for opcode in [
            OpCode::Poll,
            OpCode::PollReply,
            OpCode::Output,
            OpCode::Sync,
            OpCode::Address,
            OpCode::Input,
            OpCode::TodRequest,
            OpCode::TodData,
            OpCode::TodControl,
            OpCode::Rdm,
            OpCode::RdmSub,
            OpCode::Timecode,
            OpCode::Trigger,
            OpCode::IpProg,
            OpCode::IpProgReply,
        ] {
            assert_eq!(OpCode::from_u16(opcode.value()), Some(opcode));
        }
    }

    #[test]
    fn unknown_value_is_none() {
        assert_eq!(OpCode::from_u16(0x1234), None);
    }
}
