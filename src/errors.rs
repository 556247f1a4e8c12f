//! Error types for the codec
//!
//! Every error in this crate indicates a defect in the producer or in the
//! word stream being decoded; there are no recoverable conditions.

error_chain! {
    errors {
        WordCountOverflow(name: &'static str, words: u32) {
            description("instruction word count overflow")
            display("instruction {} spans {} words, the encoding limit is 65535", name, words)
        }
        InvalidWordCount(name: &'static str, declared: u32) {
            description("invalid instruction word count")
            display("instruction {} declares an invalid word count of {}", name, declared)
        }
        UnknownOpcode(code: u16) {
            description("unknown opcode")
            display("unknown opcode {}", code)
        }
        UnexpectedEndOfStream {
            description("unexpected end of stream")
            display("the word stream ends in the middle of an instruction")
        }
        InvalidEnumWord(kind: &'static str, word: u32) {
            description("invalid enum word")
            display("the word {} is not a valid {} value", word, kind)
        }
        InvalidString {
            description("invalid string literal")
            display("string literal is not valid UTF-8")
        }
        InvalidHeader(magic: u32) {
            description("invalid module header")
            display("expected the SPIR-V magic number, found {:#010x}", magic)
        }
    }
}
