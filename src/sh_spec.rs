//! SH-3/SH-4 address-space and memory-system constants.
//!
//! Values are taken from the Hitachi/Renesas hardware manuals for the
//! SH7709 (SH-3) and SH7750 (SH-4) groups. Both parts share the partitioned
//! 32-bit address space this model prices against; references are noted as
//! (SH7750 HM §N) where the SH-4 manual is the clearer source.

// ============================================================================
// Address-space partitions (SH7750 HM §3)
// ============================================================================

/// Strips the partition bits, leaving the 29-bit external address.
/// P0-P3 all mirror the same physical space through this mask.
pub const PHYSICAL_ADDR_MASK: u32 = 0x1FFF_FFFF;

/// Base of the P1 partition. Everything below is P0/U0, the translatable,
/// cacheable user window.
pub const P1_BASE: u32 = 0x8000_0000;

/// Base of the P3 partition. P1/P2 (from [`P1_BASE`] up to here) serve as
/// the uncached mirror in this model.
pub const P3_BASE: u32 = 0xC000_0000;

/// Base of the P4 control partition, carved out ahead of every other test.
pub const P4_CONTROL_BASE: u32 = 0xE000_0000;

/// Last address of the store-queue window inside P4 (SH7750 HM §4.7).
pub const STORE_QUEUE_LAST: u32 = 0xE3FF_FFFF;

// ============================================================================
// External-area windows (physical, after masking)
// ============================================================================

/// End of the boot ROM / BIOS window: the first megabyte of area 0.
pub const BOOT_ROM_END: u32 = 0x0010_0000;

/// End of the main-memory (SDRAM) window in area 1.
pub const MAIN_MEMORY_END: u32 = 0x0100_0000;

/// End of the CS2 expansion window.
pub const AREA2_END: u32 = 0x0500_0000;

/// End of the CS3 expansion window.
pub const AREA3_END: u32 = 0x0700_0000;

/// Base of the CS6 peripheral window.
pub const AREA6_BASE: u32 = 0x1800_0000;

/// Base of the on-chip operand RAM window. The RAM mirrors into every
/// partition, so this bound is tested against the masked address.
pub const ON_CHIP_RAM_BASE: u32 = 0x1C00_0000;

// ============================================================================
// P3/P4 control windows
// ============================================================================

/// Cache-control register window, 0xF000_0000..0xF100_0000.
pub const CACHE_CONTROL_BASE: u32 = 0xF000_0000;
pub const CACHE_CONTROL_END: u32 = 0xF100_0000;

/// UTLB address-array window, 0xF600_0000..0xF800_0000 (SH7750 HM §3.7).
pub const TLB_ARRAY_BASE: u32 = 0xF600_0000;
pub const TLB_ARRAY_END: u32 = 0xF800_0000;

// ============================================================================
// Cache, SDRAM and TLB geometry
// ============================================================================

/// Operand cache line size: 32 bytes on both parts (SH7750 HM §4.1).
pub const CACHE_LINE_BYTES: u32 = 32;

/// Mask selecting the 32-byte line an address falls in.
pub const CACHE_LINE_MASK: u32 = !(CACHE_LINE_BYTES - 1);

/// Offset of the last longword slot in a cache line. A read sitting here
/// cannot be continued by a burst without crossing the line.
pub const CACHE_LINE_LAST_SLOT: u32 = 0x1C;

/// Shift from a physical address to its SDRAM row index (2 KB rows, the
/// typical page size of the SDRAM parts these CPUs pair with).
pub const SDRAM_PAGE_SHIFT: u32 = 11;

/// Page-granular tag mask of the simulated TLB entry (4 KB pages).
pub const TLB_PAGE_MASK: u32 = 0xFFFF_F000;
