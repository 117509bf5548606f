//! Instruction timing categories and per-variant cycle tables.
//!
//! Every decoded instruction word maps to exactly one [`TimingCategory`]
//! (see [`crate::classify`]). For each category the tables here carry two
//! numbers per CPU: the base issue cost and the typical pipeline-stall
//! charge layered on top of it. Values are derived from the Hitachi
//! hardware manuals and real-world performance measurements; they describe
//! the common case, not worst-case silicon behavior.
//!
//! | CPU | Character |
//! |-----|-----------|
//! | SH-3 | short pipeline, unpipelined FPU, most FP ops multi-cycle |
//! | SH-4 | superscalar, pipelined FPU, most FP ops single-cycle issue |

use crate::CpuVariant;

/// Timing bucket for a decoded instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingCategory {
    /// Integer arithmetic (ADD, SUB, CMP, MUL, ...). Also the fallback for
    /// encodings the classifier does not recognize.
    IntArith,
    /// Integer logic (AND, OR, XOR, TST, NOT).
    IntLogic,
    /// Shifts and rotates (SHLL, SHAR, ROTL, DT, ...).
    Shift,
    /// Branches (JSR, JMP, RTS, BRAF, BSRF).
    Branch,
    /// Loads through a register or displacement address.
    Load,
    /// Stores through a register or displacement address.
    Store,
    /// PC-relative loads (MOV.W/MOV.L @(disp,PC)).
    LoadPc,
    /// Immediate loads (MOV #imm,Rn).
    LoadImm,
    /// System-register transfers (LDC, STC, ...).
    SysReg,
    /// FPU conversions (FLOAT, FTRC, FCNVDS, FCNVSD).
    Fcnv,
    /// FPU data moves (FMOV).
    Fmove,
    /// FPU arithmetic (FADD, FSUB, FMUL, FDIV, FMAC, FNEG, FABS).
    Farith,
    /// FPU comparisons (FCMP/EQ, FCMP/GT).
    Fcomp,
    /// Prefetch (PREF).
    Pref,
    /// Multi-operation instructions (MAC.L, MAC.W).
    MultiOp,
    /// Extra charge for the instruction in a branch delay slot.
    ExecSlot,
    /// Trap entry (TRAPA).
    Trap,
    /// Return from exception (RTE).
    Rte,
    /// Clear MAC register (CLRMAC).
    Clrmac,
    /// No operation.
    Nop,
    /// Cache-allocating store (MOVCA.L).
    Movca,
    /// Test and set (TAS.B).
    Tas,
    /// Multiply-accumulate priced as a unit.
    Mac,
    /// DMA setup operations.
    Dma,
    /// One division step (DIV1).
    Div,
    /// Square root family (FSQRT, FSRRA).
    Fsqrt,
    /// Vector inner product (FIPR).
    Fipr,
    /// Matrix-vector multiply (FTRV).
    Ftrv,
    /// TLB load (LDTLB).
    Ldtlb,
}

/// Number of timing categories (size of the cycle tables).
pub const CATEGORY_COUNT: usize = TimingCategory::Ldtlb as usize + 1;

impl TimingCategory {
    /// Every category, in table order.
    pub const ALL: [TimingCategory; CATEGORY_COUNT] = [
        TimingCategory::IntArith,
        TimingCategory::IntLogic,
        TimingCategory::Shift,
        TimingCategory::Branch,
        TimingCategory::Load,
        TimingCategory::Store,
        TimingCategory::LoadPc,
        TimingCategory::LoadImm,
        TimingCategory::SysReg,
        TimingCategory::Fcnv,
        TimingCategory::Fmove,
        TimingCategory::Farith,
        TimingCategory::Fcomp,
        TimingCategory::Pref,
        TimingCategory::MultiOp,
        TimingCategory::ExecSlot,
        TimingCategory::Trap,
        TimingCategory::Rte,
        TimingCategory::Clrmac,
        TimingCategory::Nop,
        TimingCategory::Movca,
        TimingCategory::Tas,
        TimingCategory::Mac,
        TimingCategory::Dma,
        TimingCategory::Div,
        TimingCategory::Fsqrt,
        TimingCategory::Fipr,
        TimingCategory::Ftrv,
        TimingCategory::Ldtlb,
    ];
}

/// Per-variant instruction timing tables, indexed by category.
#[derive(Debug, Clone)]
pub struct InsnTimings {
    base: [u32; CATEGORY_COUNT],
    stall: [u32; CATEGORY_COUNT],
}

impl InsnTimings {
    /// The timing tables of the selected CPU.
    pub const fn for_variant(variant: CpuVariant) -> &'static InsnTimings {
        match variant {
            CpuVariant::Sh3 => &SH3_INSN_TIMINGS,
            CpuVariant::Sh4 => &SH4_INSN_TIMINGS,
        }
    }

    /// Base issue cost of a category.
    #[inline]
    pub const fn base(&self, category: TimingCategory) -> u32 {
        self.base[category as usize]
    }

    /// Typical pipeline-stall charge of a category.
    #[inline]
    pub const fn stall(&self, category: TimingCategory) -> u32 {
        self.stall[category as usize]
    }
}

/// SH-3 instruction timings.
pub const SH3_INSN_TIMINGS: InsnTimings = InsnTimings {
    base: [
        1,  // IntArith
        1,  // IntLogic
        1,  // Shift
        2,  // Branch: two cycles plus the delay slot
        1,  // Load: base cost, the memory system adds more
        1,  // Store: base cost, the memory system adds more
        2,  // LoadPc: PC-relative loads pay an extra cycle
        1,  // LoadImm
        4,  // SysReg
        5,  // Fcnv
        1,  // Fmove: register-to-register
        5,  // Farith: the SH-3 FPU is not pipelined
        3,  // Fcomp
        2,  // Pref: prefetch is less effective on SH-3
        3,  // MultiOp
        1,  // ExecSlot
        6,  // Trap
        5,  // Rte
        2,  // Clrmac
        1,  // Nop
        4,  // Movca
        5,  // Tas
        3,  // Mac
        8,  // Dma
        6,  // Div: whole-division table value, see the DIV1 override
        12, // Fsqrt
        6,  // Fipr
        7,  // Ftrv
        7,  // Ldtlb
    ],
    stall: [
        0, // IntArith
        0, // IntLogic
        0, // Shift
        1, // Branch: misprediction charge
        0, // Load
        0, // Store
        1, // LoadPc: load-to-use
        0, // LoadImm
        1, // SysReg
        1, // Fcnv
        1, // Fmove
        1, // Farith
        1, // Fcomp
        0, // Pref
        1, // MultiOp
        1, // ExecSlot: the slot itself can stall
        2, // Trap
        2, // Rte
        1, // Clrmac
        0, // Nop
        2, // Movca
        2, // Tas
        2, // Mac
        3, // Dma
        1, // Div
        2, // Fsqrt
        2, // Fipr
        2, // Ftrv
        3, // Ldtlb
    ],
};

/// SH-4 instruction timings.
pub const SH4_INSN_TIMINGS: InsnTimings = InsnTimings {
    base: [
        1,  // IntArith
        1,  // IntLogic
        1,  // Shift
        2,  // Branch: two cycles plus one for the delay slot
        1,  // Load: can still be stalled by the memory system
        1,  // Store: varies with the destination
        1,  // LoadPc
        1,  // LoadImm
        3,  // SysReg
        3,  // Fcnv: conversions stay relatively expensive
        1,  // Fmove
        1,  // Farith: pipelined FPU
        1,  // Fcomp
        1,  // Pref
        2,  // MultiOp
        1,  // ExecSlot
        6,  // Trap
        4,  // Rte
        1,  // Clrmac
        1,  // Nop
        1,  // Movca
        4,  // Tas
        2,  // Mac
        8,  // Dma
        2,  // Div
        10, // Fsqrt: 20+ cycles on silicon but mostly pipelined
        4,  // Fipr: 4-cycle latency, single-cycle throughput
        4,  // Ftrv: 4-cycle latency, single-cycle throughput
        6,  // Ldtlb
    ],
    stall: [
        0, // IntArith
        0, // IntLogic
        0, // Shift
        1, // Branch
        1, // Load: load-to-use
        0, // Store
        1, // LoadPc: load-to-use
        0, // LoadImm
        1, // SysReg
        1, // Fcnv
        0, // Fmove
        0, // Farith: pipelined
        0, // Fcomp: pipelined
        0, // Pref
        1, // MultiOp
        0, // ExecSlot
        2, // Trap
        2, // Rte
        0, // Clrmac
        0, // Nop
        0, // Movca: improved over SH-3
        1, // Tas
        0, // Mac: pipelined
        1, // Dma
        1, // Div
        1, // Fsqrt
        0, // Fipr: pipelined
        0, // Ftrv: pipelined
        1, // Ldtlb
    ],
};
