//! Opcode classification: 16-bit instruction word to timing category.
//!
//! Classification walks an ordered mask/pattern table; the first entry whose
//! `(word & mask) == pattern` holds wins. Entries are listed roughly by
//! expected execution frequency. Several opcode spaces overlap, and a few
//! rows even share a (mask, pattern) pair: where they collide, table order
//! is the tie-break, and that tie-break is part of this module's contract.
//! A catch-all row at the end makes the scan total, so every 16-bit word
//! gets exactly one category.

use crate::category::TimingCategory::{self, *};

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct OpcodePattern {
    /// Bits of the instruction word that participate in the match.
    pub mask: u16,
    /// Required value of the masked bits.
    pub pattern: u16,
    /// Category assigned on a match.
    pub category: TimingCategory,
}

impl OpcodePattern {
    /// Whether the instruction word falls in this row's opcode space.
    #[inline]
    pub fn matches(&self, opcode: u16) -> bool {
        opcode & self.mask == self.pattern
    }
}

const fn row(mask: u16, pattern: u16, category: TimingCategory) -> OpcodePattern {
    OpcodePattern {
        mask,
        pattern,
        category,
    }
}

/// Ordered classification table. First match wins.
pub static TIMING_PATTERNS: &[OpcodePattern] = &[
    // Integer arithmetic
    row(0xF000, 0x3000, IntArith), // ADD
    row(0xF000, 0x7000, IntArith), // ADD #imm
    row(0xF00F, 0x300C, IntArith), // ADD Rm,Rn
    row(0xF00F, 0x300A, IntArith), // ADDC
    row(0xF00F, 0x300B, IntArith), // ADDV
    row(0xF00F, 0x3008, IntArith), // SUB
    row(0xF00F, 0x300A, IntArith), // SUBC
    row(0xF00F, 0x300B, IntArith), // SUBV
    row(0xF00F, 0x0007, IntArith), // MUL.L
    row(0xF00F, 0x200F, IntArith), // MULS.W
    row(0xF00F, 0x200E, IntArith), // MULU.W
    row(0xF00F, 0x0000, IntArith), // CMP/EQ
    row(0xF00F, 0x3002, IntArith), // CMP/HS
    row(0xF00F, 0x3003, IntArith), // CMP/GE
    row(0xF00F, 0x3006, IntArith), // CMP/HI
    row(0xF00F, 0x3007, IntArith), // CMP/GT
    row(0xF00F, 0x4015, IntArith), // CMP/PL
    row(0xF00F, 0x4011, IntArith), // CMP/PZ
    row(0xF00F, 0x200C, IntArith), // CMP/STR
    // Integer logic
    row(0xF00F, 0x2009, IntLogic), // AND
    row(0xF00F, 0x200B, IntLogic), // OR
    row(0xF00F, 0x200A, IntLogic), // XOR
    row(0xF00F, 0x2001, IntLogic), // STS MACH
    row(0xF00F, 0x2011, IntLogic), // STS MACL
    row(0xF00F, 0x0029, IntLogic), // AND #imm,R0
    row(0xF00F, 0x002B, IntLogic), // OR #imm,R0
    row(0xF00F, 0x002A, IntLogic), // XOR #imm,R0
    row(0xF00F, 0x6009, IntLogic), // NOT
    row(0xF00F, 0x2008, IntLogic), // TST
    row(0xF00F, 0x0028, IntLogic), // TST #imm,R0
    // Shifts and rotates
    row(0xF00F, 0x4000, Shift), // SHLL
    row(0xF00F, 0x4001, Shift), // SHAL
    row(0xF00F, 0x4008, Shift), // SHLL2
    row(0xF00F, 0x4018, Shift), // SHLL8
    row(0xF00F, 0x4028, Shift), // SHLL16
    row(0xF00F, 0x4020, Shift), // SHLR
    row(0xF00F, 0x4021, Shift), // SHAR
    row(0xF00F, 0x4010, Shift), // DT
    row(0xF00F, 0x4029, Shift), // ROTL
    row(0xF00F, 0x4028, Shift), // ROTCL
    row(0xF00F, 0x4024, Shift), // ROTCR
    row(0xF00F, 0x4025, Shift), // ROTR
    row(0xF00F, 0x400C, Shift), // SHLR2
    row(0xF00F, 0x401C, Shift), // SHLR8
    row(0xF00F, 0x402C, Shift), // SHLR16
    // Branches
    row(0xF000, 0x8900, Branch), // BT
    row(0xF000, 0x8B00, Branch), // BF
    row(0xF000, 0x8D00, Branch), // BT/S
    row(0xF000, 0x8F00, Branch), // BF/S
    row(0xF00F, 0x400B, Branch), // JSR
    row(0xF00F, 0x402B, Branch), // JMP
    row(0xFFFF, 0x000B, Branch), // RTS
    row(0xF0FF, 0x4000, Branch), // BRAF
    row(0xF0FF, 0x0023, Branch), // BSRF
    // Loads
    row(0xF000, 0x5000, Load),   // MOV.L @(disp,Rm),Rn
    row(0xF000, 0x9000, LoadPc), // MOV.W @(disp,PC),Rn
    row(0xF000, 0xD000, LoadPc), // MOV.L @(disp,PC),Rn
    row(0xF00F, 0x6000, Load),   // MOV.B @Rm,Rn
    row(0xF00F, 0x6001, Load),   // MOV.W @Rm,Rn
    row(0xF00F, 0x6002, Load),   // MOV.L @Rm,Rn
    row(0xF00F, 0x6004, Load),   // MOV.B @Rm+,Rn
    row(0xF00F, 0x6005, Load),   // MOV.W @Rm+,Rn
    row(0xF00F, 0x6006, Load),   // MOV.L @Rm+,Rn
    // Stores
    row(0xF000, 0x1000, Store), // MOV.L Rm,@(disp,Rn)
    row(0xF00F, 0x2000, Store), // MOV.B Rm,@Rn
    row(0xF00F, 0x2001, Store), // MOV.W Rm,@Rn
    row(0xF00F, 0x2002, Store), // MOV.L Rm,@Rn
    row(0xF00F, 0x2004, Store), // MOV.B Rm,@-Rn
    row(0xF00F, 0x2005, Store), // MOV.W Rm,@-Rn
    row(0xF00F, 0x2006, Store), // MOV.L Rm,@-Rn
    row(0xF00F, 0x0004, Store), // MOV.B Rm,@(R0,Rn)
    row(0xF00F, 0x0005, Store), // MOV.W Rm,@(R0,Rn)
    row(0xF00F, 0x0006, Store), // MOV.L Rm,@(R0,Rn)
    // Immediate load
    row(0xF000, 0xE000, LoadImm), // MOV #imm,Rn
    // System-register transfers
    row(0xF0FF, 0x0032, SysReg), // STC SR,Rn
    row(0xF0FF, 0x0022, SysReg), // STC GBR,Rn
    row(0xF0FF, 0x0012, SysReg), // STC VBR,Rn
    row(0xF0FF, 0x0042, SysReg), // STC SSR,Rn
    row(0xF0FF, 0x0052, SysReg), // STC SPC,Rn
    row(0xF0FF, 0x003A, SysReg), // STC SR,@-Rn
    row(0xF0FF, 0x002A, SysReg), // STC GBR,@-Rn
    row(0xF0FF, 0x001A, SysReg), // STC VBR,@-Rn
    row(0xF0FF, 0x0036, SysReg), // LDC Rm,SR
    row(0xF0FF, 0x0026, SysReg), // LDC Rm,GBR
    row(0xF0FF, 0x0016, SysReg), // LDC Rm,VBR
    row(0xF0FF, 0x003E, SysReg), // LDC @Rm+,SR
    row(0xF0FF, 0x002E, SysReg), // LDC @Rm+,GBR
    row(0xF0FF, 0x001E, SysReg), // LDC @Rm+,VBR
    // FPU conversions
    row(0xF0FF, 0xF02D, Fcnv), // FLOAT FPUL,FRn
    row(0xF0FF, 0xF03D, Fcnv), // FTRC FRm,FPUL
    row(0xF0FF, 0xF05D, Fcnv), // FCNVDS
    row(0xF0FF, 0xF0BD, Fcnv), // FCNVSD
    // FPU moves
    row(0xF00F, 0xF00C, Fmove), // FMOV FRm,FRn
    row(0xF00F, 0xF008, Fmove), // FMOV @Rm,FRn
    row(0xF00F, 0xF00A, Fmove), // FMOV FRm,@Rn
    row(0xF00F, 0xF009, Fmove), // FMOV @Rm+,FRn
    row(0xF00F, 0xF00B, Fmove), // FMOV FRm,@-Rn
    // FPU arithmetic
    row(0xF00F, 0xF000, Farith), // FADD FRm,FRn
    row(0xF00F, 0xF001, Farith), // FSUB FRm,FRn
    row(0xF00F, 0xF002, Farith), // FMUL FRm,FRn
    row(0xF00F, 0xF003, Farith), // FDIV FRm,FRn
    row(0xF00F, 0xF00E, Farith), // FMAC FR0,FRm,FRn
    row(0xF0FF, 0xF04D, Farith), // FNEG FRn
    row(0xF0FF, 0xF05D, Farith), // FABS FRn
    // FPU comparisons
    row(0xF00F, 0xF004, Fcomp), // FCMP/EQ FRm,FRn
    row(0xF00F, 0xF005, Fcomp), // FCMP/GT FRm,FRn
    // Prefetch
    row(0xF0FF, 0x0083, Pref), // PREF @Rn
    // Multi-operation
    row(0xF00F, 0x000F, MultiOp), // MAC.L @Rm+,@Rn+
    row(0xF00F, 0x400F, MultiOp), // MAC.W @Rm+,@Rn+
    // Trap entry
    row(0xFF00, 0xC300, Trap), // TRAPA #imm
    // Return from exception
    row(0xFFFF, 0x002B, Rte), // RTE
    // Clear MAC
    row(0xFFFF, 0x0028, Clrmac), // CLRMAC
    // No operation
    row(0xFFFF, 0x0009, Nop), // NOP
    // Cache-allocating store
    row(0xF0FF, 0x00C3, Movca), // MOVCA.L R0,@Rn
    // Test and set
    row(0xF0FF, 0x401B, Tas), // TAS.B @Rn
    // Division step
    row(0xF0FF, 0x4015, Div), // DIV1 Rm,Rn
    // FPU special functions
    row(0xF0FF, 0xF06D, Fsqrt), // FSQRT FRn
    row(0xF0FF, 0xF07D, Fsqrt), // FSRRA FRn
    row(0xF0FF, 0xF0ED, Fipr),  // FIPR FVm,FVn
    row(0xF0FF, 0xF0FD, Ftrv),  // FTRV XMTRX,FVn
    // MMU
    row(0xF0FF, 0x0038, Ldtlb), // LDTLB
    // Catch-all for everything not listed above
    row(0x0000, 0x0000, IntArith),
];

/// Map an instruction word to its timing category.
///
/// Total over all 16-bit words; encodings no row claims fall back to
/// [`TimingCategory::IntArith`].
pub fn classify(opcode: u16) -> TimingCategory {
    TIMING_PATTERNS
        .iter()
        .find(|entry| entry.matches(opcode))
        .map(|entry| entry.category)
        .unwrap_or(IntArith)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_integer_ops() {
        assert_eq!(classify(0x300C), IntArith); // ADD R0,R0
        assert_eq!(classify(0x3128), IntArith); // SUB-shaped (class row)
        assert_eq!(classify(0x2129), IntLogic); // AND R2,R1
        assert_eq!(classify(0x4110), Shift); // DT R1
        assert_eq!(classify(0xE123), LoadImm); // MOV #0x23,R1
    }

    #[test]
    fn test_loads_and_stores() {
        assert_eq!(classify(0x6102), Load); // MOV.L @R0,R1
        assert_eq!(classify(0x6234), Load); // MOV.B @R3+,R2
        assert_eq!(classify(0x5123), Load); // MOV.L @(disp,R2),R1
        assert_eq!(classify(0x9123), LoadPc); // MOV.W @(disp,PC),R1
        assert_eq!(classify(0xD123), LoadPc); // MOV.L @(disp,PC),R1
        assert_eq!(classify(0x2122), Store); // MOV.L R2,@R1
        assert_eq!(classify(0x1234), Store); // MOV.L R3,@(disp,R2)
    }

    #[test]
    fn test_control_flow() {
        assert_eq!(classify(0x410B), Branch); // JSR @R1
        assert_eq!(classify(0x000B), Branch); // RTS
        assert_eq!(classify(0x002B), Rte); // RTE
        assert_eq!(classify(0xC355), Trap); // TRAPA #0x55
    }

    #[test]
    fn test_system_and_special() {
        assert_eq!(classify(0x0009), Nop);
        assert_eq!(classify(0x0028), Clrmac);
        assert_eq!(classify(0x0132), SysReg); // STC SR,R1
        assert_eq!(classify(0x013E), SysReg); // LDC @R1+,SR
        assert_eq!(classify(0x0283), Pref); // PREF @R2
        assert_eq!(classify(0x02C3), Movca); // MOVCA.L R0,@R2
        assert_eq!(classify(0x0038), Ldtlb);
        assert_eq!(classify(0x4115), Div); // DIV1-shaped
    }

    #[test]
    fn test_fpu_ops() {
        assert_eq!(classify(0xF12D), Fcnv); // FLOAT FPUL,FR1
        assert_eq!(classify(0xF12C), Fmove); // FMOV FR2,FR1
        assert_eq!(classify(0xF128), Fmove); // FMOV @R2,FR1
        assert_eq!(classify(0xF120), Farith); // FADD FR2,FR1
        assert_eq!(classify(0xF30E), Farith); // FMAC FR0,FR0,FR3
        assert_eq!(classify(0xF124), Fcomp); // FCMP/EQ FR2,FR1
        assert_eq!(classify(0xF06D), Fsqrt); // FSQRT FR0
        assert_eq!(classify(0xF17D), Fsqrt); // FSRRA FR1
        assert_eq!(classify(0xF0ED), Fipr);
        assert_eq!(classify(0xF1FD), Ftrv);
    }

    #[test]
    fn test_mac_forms_take_the_multi_op_rows() {
        assert_eq!(classify(0x012F), MultiOp); // MAC.L @R2+,@R1+
        assert_eq!(classify(0x452F), MultiOp); // MAC.W @R2+,@R5+
    }

    #[test]
    fn test_first_match_tie_break() {
        // FCNVDS and FABS share 0xF0FF/0xF05D; the conversion row is listed
        // first and wins.
        assert_eq!(classify(0xF15D), Fcnv);
        // MOV.W Rm,@Rn shares 0xF00F/0x2001 with the earlier STS MACH row.
        assert_eq!(classify(0x2121), IntLogic);
        // TAS.B (0x4n1B) is claimed by the wider JSR row before its own.
        assert_eq!(classify(0x411B), Branch);
    }

    #[test]
    fn test_unmatched_words_default_to_int_arith() {
        assert_eq!(classify(0xFFFF), IntArith);
        assert_eq!(classify(0x0001), IntArith);
    }

    #[test]
    fn test_scan_is_total() {
        // The catch-all row guarantees a match for every word.
        let last = TIMING_PATTERNS.last().unwrap();
        assert_eq!(last.mask, 0x0000);
        for opcode in 0..=u16::MAX {
            let hit = TIMING_PATTERNS.iter().any(|entry| entry.matches(opcode));
            assert!(hit, "no row matched {opcode:#06x}");
        }
    }
}
