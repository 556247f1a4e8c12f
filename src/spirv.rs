//! Definitions for various SPIR-V values
//!
//! The enums defined as `Value` in the SPIR-V registry are retranscribed as
//! simple enums, and the types defined as `Bit` are represented with structs
//! (having a named bool field for each bit). All these types can be
//! transformed into SPIR-V words with the `Into<u32>` trait, read back with
//! `TryFrom<u32>`, and print their symbolic name with `Display`.
//!
//! Every value also reports the capabilities its use implies through
//! `capabilities()`; the lists follow the SPIR-V registry and are returned
//! as-is, without transitive expansion.

use std::convert::TryFrom;
use std::fmt;

use errors::{Error, ErrorKind};

macro_rules! value_enum {
    (
        $(#[$attr:meta])*
        $name:ident {
            $( $variant:ident = $word:literal => [ $( $cap:ident ),* ], )*
        }
    ) => {
        $(#[$attr])*
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        #[repr(u32)]
        pub enum $name {
            $( $variant = $word, )*
        }

        impl $name {
            /// Get the capabilities a module must support to use this value
            pub fn capabilities(self) -> &'static [Capability] {
                match self {
                    $( $name::$variant => &[ $( Capability::$cap ),* ], )*
                }
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> u32 {
                value as u32
            }
        }

        impl TryFrom<u32> for $name {
            type Error = Error;

            fn try_from(word: u32) -> ::std::result::Result<$name, Error> {
                match word {
                    $( $word => Ok($name::$variant), )*
                    other => Err(ErrorKind::InvalidEnumWord(stringify!($name), other).into()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                match *self {
                    $( $name::$variant => f.write_str(stringify!($variant)), )*
                }
            }
        }
    };
}

value_enum! {
    /// A device feature an instruction or operand may depend on
    ///
    /// The capability list of a capability value holds its implicit
    /// requirements (eg. declaring `Pipes` only makes sense on a device
    /// already exposing `Kernel`)
    Capability {
        Matrix = 0 => [],
        Shader = 1 => [Matrix],
        Geometry = 2 => [Shader],
        Tessellation = 3 => [Shader],
        Addresses = 4 => [],
        Linkage = 5 => [],
        Kernel = 6 => [],
        Vector16 = 7 => [Kernel],
        Float16Buffer = 8 => [Kernel],
        Float16 = 9 => [],
        Float64 = 10 => [],
        Int64 = 11 => [],
        Int64Atomics = 12 => [Int64],
        ImageBasic = 13 => [Kernel],
        ImageReadWrite = 14 => [ImageBasic],
        Pipes = 17 => [Kernel],
        Groups = 18 => [],
        DeviceEnqueue = 19 => [Kernel],
        LiteralSampler = 20 => [Kernel],
        AtomicStorage = 21 => [Shader],
        Int16 = 22 => [],
        GenericPointer = 38 => [Addresses],
        Int8 = 39 => [Kernel],
        SubgroupDispatch = 58 => [DeviceEnqueue],
        SubgroupShuffleINTEL = 5568 => [Kernel],
        SubgroupBufferBlockIOINTEL = 5569 => [Kernel],
    }
}

value_enum! {
    /// The execution model of an entry point
    ExecutionModel {
        Vertex = 0 => [Shader],
        TessellationControl = 1 => [Tessellation],
        TessellationEvaluation = 2 => [Tessellation],
        Geometry = 3 => [Geometry],
        Fragment = 4 => [Shader],
        GLCompute = 5 => [Shader],
        Kernel = 6 => [Kernel],
    }
}

value_enum! {
    /// How pointers are interpreted by the module
    AddressingModel {
        Logical = 0 => [],
        Physical32 = 1 => [Addresses],
        Physical64 = 2 => [Addresses],
    }
}

value_enum! {
    /// The memory consistency rules of the module
    MemoryModel {
        Simple = 0 => [Shader],
        GLSL450 = 1 => [Shader],
        OpenCL = 2 => [Kernel],
    }
}

value_enum! {
    /// A mode declared for an entry point with `OpExecutionMode`
    ExecutionMode {
        Invocations = 0 => [Geometry],
        PixelCenterInteger = 6 => [Shader],
        OriginUpperLeft = 7 => [Shader],
        OriginLowerLeft = 8 => [Shader],
        EarlyFragmentTests = 9 => [Shader],
        DepthReplacing = 12 => [Shader],
        LocalSize = 17 => [],
        LocalSizeHint = 18 => [Kernel],
        InputPoints = 19 => [Geometry],
        OutputVertices = 26 => [Geometry],
        VecTypeHint = 30 => [Kernel],
        ContractionOff = 31 => [Kernel],
    }
}

value_enum! {
    /// Where a pointer or variable lives in memory
    StorageClass {
        UniformConstant = 0 => [],
        Input = 1 => [],
        Uniform = 2 => [Shader],
        Output = 3 => [Shader],
        Workgroup = 4 => [],
        CrossWorkgroup = 5 => [],
        Private = 6 => [Shader],
        Function = 7 => [],
        Generic = 8 => [GenericPointer],
        PushConstant = 9 => [Shader],
        AtomicCounter = 10 => [AtomicStorage],
        Image = 11 => [],
    }
}

value_enum! {
    /// An annotation applied to an id with `OpDecorate` or `OpMemberDecorate`
    Decoration {
        RelaxedPrecision = 0 => [Shader],
        SpecId = 1 => [Shader],
        Block = 2 => [Shader],
        BufferBlock = 3 => [Shader],
        RowMajor = 4 => [Matrix],
        ColMajor = 5 => [Matrix],
        ArrayStride = 6 => [Shader],
        MatrixStride = 7 => [Matrix],
        CPacked = 10 => [Kernel],
        BuiltIn = 11 => [],
        NoPerspective = 13 => [Shader],
        Flat = 14 => [Shader],
        Restrict = 19 => [],
        Aliased = 20 => [],
        Volatile = 21 => [],
        Constant = 22 => [Kernel],
        Coherent = 23 => [],
        NonWritable = 24 => [],
        NonReadable = 25 => [],
        Uniform = 26 => [Shader],
        SaturatedConversion = 28 => [Kernel],
        Location = 30 => [Shader],
        Component = 31 => [Shader],
        Index = 32 => [Shader],
        Binding = 33 => [Shader],
        DescriptorSet = 34 => [Shader],
        Offset = 35 => [Shader],
        FuncParamAttr = 38 => [Kernel],
        FPRoundingMode = 39 => [Kernel],
        FPFastMathMode = 40 => [Kernel],
        LinkageAttributes = 41 => [Linkage],
        NoContraction = 42 => [Shader],
        Alignment = 44 => [Kernel],
    }
}

value_enum! {
    /// The source language declared with `OpSource`
    SourceLanguage {
        Unknown = 0 => [],
        ESSL = 1 => [],
        GLSL = 2 => [],
        OpenCLC = 3 => [],
        OpenCLCpp = 4 => [],
    }
}

value_enum! {
    /// The access rights of a pipe or image type
    AccessQualifier {
        ReadOnly = 0 => [Kernel],
        WriteOnly = 1 => [Kernel],
        ReadWrite = 2 => [Kernel],
    }
}

value_enum! {
    /// How a group operation combines the values of the invocations
    GroupOperation {
        Reduce = 0 => [Kernel],
        InclusiveScan = 1 => [Kernel],
        ExclusiveScan = 2 => [Kernel],
    }
}

/// Function declaration hints for `OpFunction`
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FunctionControl {
    pub inline_hint: bool,
    pub dont_inline: bool,
    pub pure_function: bool,
    pub const_function: bool,
}

impl FunctionControl {
    pub const NONE: FunctionControl = FunctionControl {
        inline_hint: false,
        dont_inline: false,
        pure_function: false,
        const_function: false,
    };

    pub fn capabilities(self) -> &'static [Capability] {
        &[]
    }
}

impl From<FunctionControl> for u32 {
    fn from(value: FunctionControl) -> u32 {
        let mut word = 0;
        if value.inline_hint {
            word |= 0x1;
        }
        if value.dont_inline {
            word |= 0x2;
        }
        if value.pure_function {
            word |= 0x4;
        }
        if value.const_function {
            word |= 0x8;
        }
        word
    }
}

impl TryFrom<u32> for FunctionControl {
    type Error = Error;

    fn try_from(word: u32) -> ::std::result::Result<FunctionControl, Error> {
        if word & !0xF != 0 {
            return Err(ErrorKind::InvalidEnumWord("FunctionControl", word).into());
        }

        Ok(FunctionControl {
            inline_hint: word & 0x1 != 0,
            dont_inline: word & 0x2 != 0,
            pure_function: word & 0x4 != 0,
            const_function: word & 0x8 != 0,
        })
    }
}

impl fmt::Display for FunctionControl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names = [
            (self.inline_hint, "Inline"),
            (self.dont_inline, "DontInline"),
            (self.pure_function, "Pure"),
            (self.const_function, "Const"),
        ];

        let mut empty = true;
        for &(set, name) in &names {
            if set {
                if !empty {
                    f.write_str("|")?;
                }

                f.write_str(name)?;
                empty = false;
            }
        }

        if empty {
            f.write_str("None")?;
        }

        Ok(())
    }
}

/// Memory access hints for `OpLoad` and `OpStore`
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct MemoryAccess {
    pub volatile: bool,
    pub nontemporal: bool,
}

impl MemoryAccess {
    pub const NONE: MemoryAccess = MemoryAccess {
        volatile: false,
        nontemporal: false,
    };

    pub fn capabilities(self) -> &'static [Capability] {
        &[]
    }
}

impl From<MemoryAccess> for u32 {
    fn from(value: MemoryAccess) -> u32 {
        let mut word = 0;
        if value.volatile {
            word |= 0x1;
        }
        if value.nontemporal {
            word |= 0x4;
        }
        word
    }
}

impl TryFrom<u32> for MemoryAccess {
    type Error = Error;

    fn try_from(word: u32) -> ::std::result::Result<MemoryAccess, Error> {
        if word & !0x5 != 0 {
            return Err(ErrorKind::InvalidEnumWord("MemoryAccess", word).into());
        }

        Ok(MemoryAccess {
            volatile: word & 0x1 != 0,
            nontemporal: word & 0x4 != 0,
        })
    }
}

impl fmt::Display for MemoryAccess {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.volatile, self.nontemporal) {
            (false, false) => f.write_str("None"),
            (true, false) => f.write_str("Volatile"),
            (false, true) => f.write_str("Nontemporal"),
            (true, true) => f.write_str("Volatile|Nontemporal"),
        }
    }
}
