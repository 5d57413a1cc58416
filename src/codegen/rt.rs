//! A simple runtime which can be used to execute emitted instructions.

use core::ffi::c_void;
use nix::sys::mman::{mmap, mprotect, munmap, MapFlags, ProtFlags};

const PAGE_SIZE: usize = 4096;

/// One `mmap`ed executable page holding a single compiled routine's code.
///
/// Unlike the toy runtime this was grounded on, the page size is rounded up
/// to fit `code` rather than asserting a fixed 4096 byte cap — an
/// ahead-of-time whole-program compile, or a large hot loop body, can easily
/// exceed one page.
pub struct CodeRuntime {
    buf: *mut c_void,
    len: usize,
}

impl CodeRuntime {
    /// Copy `code` into a fresh executable page.
    pub fn new(code: impl AsRef<[u8]>) -> CodeRuntime {
        let code = code.as_ref();
        let alloc_len = (code.len().max(1)).div_ceil(PAGE_SIZE) * PAGE_SIZE;
        let len = core::num::NonZeroUsize::new(alloc_len).unwrap();

        let buf = unsafe {
            mmap(
                None,
                len,
                ProtFlags::PROT_WRITE,
                MapFlags::MAP_PRIVATE | MapFlags::MAP_ANONYMOUS,
                0, /* fd */
                0, /* off */
            )
            .expect("failed to mmap executable page for compiled routine")
        };

        unsafe { std::ptr::copy_nonoverlapping(code.as_ptr(), buf.cast(), code.len()) };

        unsafe {
            // Remove write permissions from the code buffer and allow
            // read-execute from it.
            mprotect(buf, len.get(), ProtFlags::PROT_READ | ProtFlags::PROT_EXEC)
                .expect("failed to mprotect compiled routine's code page RX")
        };

        CodeRuntime {
            buf,
            len: len.get(),
        }
    }

    /// Reinterpret the mapped code as a callable `F`.
    ///
    /// # Safety
    ///
    /// `F` must match the calling convention and signature the emitted code
    /// actually implements.
    #[inline]
    pub unsafe fn as_fn<F>(&self) -> F {
        unsafe { std::mem::transmute_copy(&self.buf) }
    }
}

impl Drop for CodeRuntime {
    fn drop(&mut self) {
        unsafe {
            munmap(self.buf, self.len).expect("failed to munmap compiled routine's code page");
        }
    }
}
