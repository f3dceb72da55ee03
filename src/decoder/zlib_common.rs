//Signature:
//
// # Zlib
//
//      FLEVEL: 0       1       2       3
//CINFO:
//     0      08 1D   08 5B   08 99   08 D7
//     1      18 19   18 57   18 95   18 D3
//     2      28 15   28 53   28 91   28 CF
//     3      38 11   38 4F   38 8D   38 CB
//     4      48 0D   48 4B   48 89   48 C7
//     5      58 09   58 47   58 85   58 C3
//     6      68 05   68 43   68 81   68 DE
//     7      78 01   78 5E   78 9C   78 DA
//
// # GZIP
//
// Just constant `1F 8B`

//32K window
const MAX_WBITS: i8 = 15;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(i8)]
///Decompression mode
///
///Selects framing expected in front of DEFLATE data.
pub enum ZlibMode {
    ///Assumes raw deflate
    Deflate = -MAX_WBITS,
    ///Assumes zlib header
    Zlib = MAX_WBITS,
    ///Assumes gzip header
    Gzip = MAX_WBITS + 16,
    ///Automatically detect zlib or gzip header.
    ///
    ///Default value.
    Auto = MAX_WBITS + 32,
}

impl ZlibMode {
    #[inline(always)]
    pub(crate) const fn window_bits(self) -> core::ffi::c_int {
        self as _
    }
}

impl Default for ZlibMode {
    #[inline(always)]
    fn default() -> Self {
        Self::Auto
    }
}
