//! Flush-to-zero handling for the duration of a processing call.
//!
//! Denormal floats are orders of magnitude slower on most FPUs, so the processor enables
//! flush-to-zero (and denormals-are-zero where the hardware has it) while it runs and restores
//! the caller's mode afterwards. On targets without a known control register this is a no-op.

#[cfg(target_arch = "x86_64")]
#[allow(deprecated)]
use std::arch::x86_64::{_mm_getcsr, _mm_setcsr};

/// MXCSR flush-to-zero (bit 15) and denormals-are-zero (bit 6)
#[cfg(target_arch = "x86_64")]
const MXCSR_FTZ_DAZ: u32 = 0x8040;

/// FPCR flush-to-zero (bit 24)
#[cfg(target_arch = "aarch64")]
const FPCR_FZ: u64 = 1 << 24;

/// Enables flush-to-zero until dropped.
pub struct ScopedNoDenormals {
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    previous: Register,
}

#[cfg(target_arch = "x86_64")]
type Register = u32;
#[cfg(target_arch = "aarch64")]
type Register = u64;

impl ScopedNoDenormals {
    #[inline]
    pub fn new() -> Self {
        #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
        {
            let previous = read_register();
            write_register(previous | FLUSH_BITS);
            Self { previous }
        }

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self {}
        }
    }
}

impl Default for ScopedNoDenormals {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScopedNoDenormals {
    #[inline]
    fn drop(&mut self) {
        #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
        write_register(self.previous);
    }
}

/// Whether flush-to-zero is currently enabled on this thread.
pub fn flush_to_zero_enabled() -> bool {
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    {
        read_register() & FLUSH_BITS == FLUSH_BITS
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        false
    }
}

#[cfg(target_arch = "x86_64")]
const FLUSH_BITS: Register = MXCSR_FTZ_DAZ;
#[cfg(target_arch = "aarch64")]
const FLUSH_BITS: Register = FPCR_FZ;

#[cfg(target_arch = "x86_64")]
#[inline]
#[allow(deprecated)]
fn read_register() -> Register {
    // SAFETY: SSE is part of the x86_64 baseline
    unsafe { _mm_getcsr() }
}

#[cfg(target_arch = "x86_64")]
#[inline]
#[allow(deprecated)]
fn write_register(value: Register) {
    // SAFETY: only the FTZ/DAZ bits differ from a value read from the same register
    unsafe { _mm_setcsr(value) }
}

#[cfg(target_arch = "aarch64")]
#[inline]
fn read_register() -> Register {
    let value: u64;
    // SAFETY: reading FPCR has no side effects
    unsafe { std::arch::asm!("mrs {}, fpcr", out(reg) value) };
    value
}

#[cfg(target_arch = "aarch64")]
#[inline]
fn write_register(value: Register) {
    // SAFETY: only the FZ bit differs from a value read from the same register
    unsafe { std::arch::asm!("msr fpcr, {}", in(reg) value) };
}
