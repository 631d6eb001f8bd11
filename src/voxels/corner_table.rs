//! # Corner Table Module
//!
//! The triangulation table: for every corner-occupancy code, the ordered list
//! of cube corners whose triangles approximate the boundary between buried and
//! exposed space inside the voxel.
//!
//! The code is a bitmask over the buried corners with corner 0 as the least
//! significant bit (see [`CornerSet::code`](super::voxel::corner::CornerSet::code)).
//! Every entry holds whole triangles, three corner indices each.
//!
//! Empty entries are known unresolved configurations: ambiguous cells (an
//! intersecting square or a double-sided triangle) and cells with too few
//! exposed corners to form a triangle without edge interpolation. Such cells
//! produce no geometry and leave a gap or flat patch in the mesh.

use cgmath::Point3;

use super::voxel::corner::Corner;

/// Number of distinct occupancy codes.
pub const TABLE_SIZE: usize = 256;

/// Triangle corner indices per occupancy code. The comment lists the buried corners.
#[rustfmt::skip]
pub static TRIANGULATION_TABLE: [&[u8]; TABLE_SIZE] = [
    &[], //   0: {}
    &[1, 3, 4], //   1: {0}
    &[0, 5, 2], //   2: {1}
    &[3, 4, 2, 2, 4, 5], //   3: {0, 1}
    &[3, 1, 6], //   4: {2}
    &[1, 3, 4, 3, 1, 6], //   5: {0, 2}
    &[0, 5, 3, 3, 5, 6], //   6: {1, 2}
    &[4, 5, 3, 3, 5, 6], //   7: {0, 1, 2}
    &[2, 7, 0], //   8: {3}
    &[2, 7, 1, 1, 7, 4], //   9: {0, 3}
    &[2, 7, 0, 0, 5, 2], //  10: {1, 3}
    &[7, 4, 2, 2, 4, 5], //  11: {0, 1, 3}
    &[1, 6, 0, 0, 6, 7], //  12: {2, 3}
    &[7, 4, 1, 1, 6, 7], //  13: {0, 2, 3}
    &[0, 5, 6, 6, 7, 0], //  14: {1, 2, 3}
    &[4, 5, 7, 7, 5, 6], //  15: {0, 1, 2, 3}
    &[0, 7, 5], //  16: {4}
    &[3, 7, 1, 1, 7, 5], //  17: {0, 4}
    &[0, 7, 5, 0, 5, 2], //  18: {1, 4}
    &[3, 7, 5, 5, 2, 3], //  19: {0, 1, 4}
    &[0, 7, 5, 3, 1, 6], //  20: {2, 4}
    &[3, 7, 1, 1, 7, 5, 2, 5, 7], //  21: {0, 2, 4}
    &[0, 7, 5, 5, 6, 0, 0, 6, 3], //  22: {1, 2, 4}
    &[3, 7, 5, 5, 6, 3], //  23: {0, 1, 2, 4}
    &[0, 7, 5, 0, 2, 7], //  24: {3, 4}
    &[5, 1, 7, 7, 1, 2], //  25: {0, 3, 4}
    &[0, 7, 5, 0, 2, 7, 0, 5, 2], //  26: {1, 3, 4}
    &[2, 7, 5], //  27: {0, 1, 3, 4}
    &[0, 7, 5, 0, 7, 1, 1, 7, 6], //  28: {2, 3, 4}
    &[1, 7, 5, 1, 6, 7], //  29: {0, 2, 3, 4}
    &[0, 7, 5, 5, 6, 0, 0, 6, 7], //  30: {1, 2, 3, 4}
    &[7, 5, 6], //  31: {0, 1, 2, 3, 4}
    &[1, 4, 6], //  32: {5}
    &[1, 4, 6, 1, 3, 4], //  33: {0, 5}
    &[0, 4, 2, 2, 4, 6], //  34: {1, 5}
    &[3, 4, 2, 2, 4, 6], //  35: {0, 1, 5}
    &[1, 4, 6, 6, 3, 1], //  36: {2, 5}
    &[3, 4, 1, 1, 6, 3, 1, 4, 6], //  37: {0, 2, 5}
    &[0, 4, 6, 6, 3, 0], //  38: {1, 2, 5}
    &[4, 6, 3], //  39: {0, 1, 2, 5}
    &[1, 4, 6, 2, 7, 0], //  40: {3, 5}
    &[2, 7, 1, 1, 7, 4], //  41: {0, 3, 5}
    &[0, 4, 2, 2, 4, 6, 2, 7, 0], //  42: {1, 3, 5}
    &[7, 4, 2, 2, 4, 6], //  43: {0, 1, 3, 5}
    &[1, 4, 6, 1, 6, 0, 0, 6, 7], //  44: {2, 3, 5}
    &[1, 4, 6, 1, 4, 7, 1, 7, 6], //  45: {0, 2, 3, 5}
    &[0, 4, 6, 6, 7, 0], //  46: {1, 2, 3, 5}
    &[4, 6, 7], //  47: {0, 1, 2, 3, 5}
    &[0, 7, 1, 1, 7, 6], //  48: {4, 5}
    &[3, 7, 1, 1, 7, 6], //  49: {0, 4, 5}
    &[0, 7, 6, 6, 2, 0], //  50: {1, 4, 5}
    &[3, 7, 2, 2, 7, 6], //  51: {0, 1, 4, 5}
    &[0, 7, 1, 1, 7, 6, 6, 3, 1], //  52: {2, 4, 5}
    &[1, 7, 6, 1, 3, 7, 1, 6, 3], //  53: {0, 2, 4, 5}
    &[0, 7, 6, 0, 6, 3], //  54: {1, 2, 4, 5}
    &[3, 7, 6], //  55: {0, 1, 2, 4, 5}
    &[0, 7, 1, 1, 7, 6, 2, 7, 0], //  56: {3, 4, 5}
    &[2, 7, 1, 1, 7, 6], //  57: {0, 3, 4, 5}
    &[2, 7, 0, 0, 7, 6, 6, 2, 0], //  58: {1, 3, 4, 5}
    &[2, 7, 6], //  59: {0, 1, 3, 4, 5}
    &[], //  60: {2, 3, 4, 5}
    &[], //  61: {0, 2, 3, 4, 5}
    &[], //  62: {1, 2, 3, 4, 5}
    &[], //  63: {0, 1, 2, 3, 4, 5}
    &[2, 5, 7], //  64: {6}
    &[2, 5, 7, 3, 4, 1], //  65: {0, 6}
    &[0, 5, 2, 2, 5, 7], //  66: {1, 6}
    &[2, 5, 7, 3, 4, 2, 2, 4, 5], //  67: {0, 1, 6}
    &[1, 5, 3, 3, 5, 7], //  68: {2, 6}
    &[3, 4, 1, 1, 5, 3, 3, 5, 7], //  69: {0, 2, 6}
    &[0, 5, 3, 3, 5, 7], //  70: {1, 2, 6}
    &[3, 4, 5, 5, 7, 3], //  71: {0, 1, 2, 6}
    &[2, 5, 7, 2, 7, 0], //  72: {3, 6}
    &[2, 5, 7, 2, 7, 1, 1, 7, 4], //  73: {0, 3, 6}
    &[2, 5, 7, 2, 7, 0, 0, 5, 2], //  74: {1, 3, 6}
    &[2, 5, 7, 2, 7, 4, 2, 4, 5], //  75: {0, 1, 3, 6}
    &[1, 5, 7, 7, 0, 1], //  76: {2, 3, 6}
    &[1, 5, 7, 1, 7, 4], //  77: {0, 2, 3, 6}
    &[0, 5, 7], //  78: {1, 2, 3, 6}
    &[4, 5, 7], //  79: {0, 1, 2, 3, 6}
    &[0, 7, 5, 2, 5, 7], //  80: {4, 6}
    &[3, 7, 1, 1, 7, 5, 2, 5, 7], //  81: {0, 4, 6}
    &[0, 7, 5, 0, 5, 2, 2, 5, 7], //  82: {1, 4, 6}
    &[2, 5, 7, 3, 7, 5, 3, 5, 2], //  83: {0, 1, 4, 6}
    &[0, 7, 5, 3, 7, 1, 1, 7, 5], //  84: {2, 4, 6}
    &[], //  85: {0, 2, 4, 6}
    &[0, 7, 5, 3, 5, 7, 3, 0, 5], //  86: {1, 2, 4, 6}
    &[3, 5, 7, 3, 7, 5], //  87: {0, 1, 2, 4, 6}
    &[2, 7, 0, 0, 7, 5, 2, 5, 7], //  88: {3, 4, 6}
    &[2, 7, 1, 1, 7, 5, 2, 5, 7], //  89: {0, 3, 4, 6}
    &[], //  90: {1, 3, 4, 6}
    &[], //  91: {0, 1, 3, 4, 6}
    &[0, 7, 5, 1, 7, 0, 1, 5, 7], //  92: {2, 3, 4, 6}
    &[], //  93: {0, 2, 3, 4, 6}
    &[], //  94: {1, 2, 3, 4, 6}
    &[], //  95: {0, 1, 2, 3, 4, 6}
    &[1, 4, 2, 2, 4, 7], //  96: {5, 6}
    &[1, 4, 2, 2, 4, 7, 3, 4, 1], //  97: {0, 5, 6}
    &[0, 4, 2, 2, 4, 7], //  98: {1, 5, 6}
    &[3, 4, 2, 2, 4, 7], //  99: {0, 1, 5, 6}
    &[1, 7, 3, 1, 4, 7], // 100: {2, 5, 6}
    &[3, 4, 1, 1, 4, 7, 1, 7, 3], // 101: {0, 2, 5, 6}
    &[0, 4, 3, 3, 4, 7], // 102: {1, 2, 5, 6}
    &[3, 4, 7], // 103: {0, 1, 2, 5, 6}
    &[2, 7, 0, 1, 4, 2, 2, 4, 7], // 104: {3, 5, 6}
    &[], // 105: {0, 3, 5, 6}
    &[0, 4, 2, 2, 4, 7, 2, 7, 0], // 106: {1, 3, 5, 6}
    &[], // 107: {0, 1, 3, 5, 6}
    &[1, 4, 7, 7, 0, 1], // 108: {2, 3, 5, 6}
    &[], // 109: {0, 2, 3, 5, 6}
    &[0, 4, 7], // 110: {1, 2, 3, 5, 6}
    &[], // 111: {0, 1, 2, 3, 5, 6}
    &[0, 7, 1, 7, 2, 1], // 112: {4, 5, 6}
    &[3, 7, 1, 1, 7, 2], // 113: {0, 4, 5, 6}
    &[0, 7, 2], // 114: {1, 4, 5, 6}
    &[3, 7, 2], // 115: {0, 1, 4, 5, 6}
    &[0, 7, 1, 1, 7, 3], // 116: {2, 4, 5, 6}
    &[], // 117: {0, 2, 4, 5, 6}
    &[0, 7, 3], // 118: {1, 2, 4, 5, 6}
    &[], // 119: {0, 1, 2, 4, 5, 6}
    &[0, 7, 1, 1, 7, 2, 2, 7, 0], // 120: {3, 4, 5, 6}
    &[], // 121: {0, 3, 4, 5, 6}
    &[], // 122: {1, 3, 4, 5, 6}
    &[], // 123: {0, 1, 3, 4, 5, 6}
    &[], // 124: {2, 3, 4, 5, 6}
    &[], // 125: {0, 2, 3, 4, 5, 6}
    &[], // 126: {1, 2, 3, 4, 5, 6}
    &[], // 127: {0, 1, 2, 3, 4, 5, 6}
    &[3, 6, 4], // 128: {7}
    &[3, 6, 4, 3, 4, 1], // 129: {0, 7}
    &[3, 6, 4, 0, 5, 2], // 130: {1, 7}
    &[3, 4, 2, 2, 4, 5, 3, 6, 4], // 131: {0, 1, 7}
    &[3, 6, 4, 1, 6, 3], // 132: {2, 7}
    &[3, 6, 4, 1, 6, 3, 3, 4, 1], // 133: {0, 2, 7}
    &[3, 6, 4, 0, 5, 3, 3, 5, 6], // 134: {1, 2, 7}
    &[3, 6, 4, 3, 4, 5, 3, 5, 6], // 135: {0, 1, 2, 7}
    &[2, 6, 0, 0, 6, 4], // 136: {3, 7}
    &[2, 6, 4, 4, 1, 2], // 137: {0, 3, 7}
    &[0, 5, 2, 2, 6, 0, 0, 6, 4], // 138: {1, 3, 7}
    &[2, 4, 5, 2, 6, 4], // 139: {0, 1, 3, 7}
    &[1, 6, 0, 0, 6, 4], // 140: {2, 3, 7}
    &[1, 6, 4], // 141: {0, 2, 3, 7}
    &[0, 5, 6, 6, 4, 0], // 142: {1, 2, 3, 7}
    &[5, 6, 4], // 143: {0, 1, 2, 3, 7}
    &[3, 6, 0, 0, 6, 5], // 144: {4, 7}
    &[3, 5, 1, 3, 6, 5], // 145: {0, 4, 7}
    &[3, 6, 0, 0, 6, 5, 0, 5, 2], // 146: {1, 4, 7}
    &[3, 5, 2, 3, 6, 5], // 147: {0, 1, 4, 7}
    &[3, 6, 0, 0, 6, 5, 1, 6, 5], // 148: {2, 4, 7}
    &[3, 6, 1, 3, 6, 5, 3, 5, 1], // 149: {0, 2, 4, 7}
    &[], // 150: {1, 2, 4, 7}
    &[], // 151: {0, 1, 2, 4, 7}
    &[0, 6, 5, 2, 6, 0], // 152: {3, 4, 7}
    &[2, 6, 1, 1, 6, 5], // 153: {0, 3, 4, 7}
    &[0, 5, 2, 2, 6, 0], // 154: {1, 3, 4, 7}
    &[2, 6, 5], // 155: {0, 1, 3, 4, 7}
    &[0, 6, 5, 1, 6, 0], // 156: {2, 3, 4, 7}
    &[1, 6, 5], // 157: {0, 2, 3, 4, 7}
    &[], // 158: {1, 2, 3, 4, 7}
    &[], // 159: {0, 1, 2, 3, 4, 7}
    &[3, 6, 4, 1, 4, 6], // 160: {5, 7}
    &[3, 4, 1, 3, 6, 4, 1, 4, 6], // 161: {0, 5, 7}
    &[0, 4, 2, 2, 4, 6, 3, 6, 4], // 162: {1, 5, 7}
    &[3, 6, 4, 3, 4, 2, 2, 4, 6], // 163: {0, 1, 5, 7}
    &[1, 6, 3, 3, 6, 4, 1, 4, 6], // 164: {2, 5, 7}
    &[], // 165: {0, 2, 5, 7}
    &[3, 6, 4, 3, 0, 6, 0, 4, 6], // 166: {1, 2, 5, 7}
    &[], // 167: {0, 1, 2, 5, 7}
    &[2, 6, 0, 0, 6, 4, 1, 4, 6], // 168: {3, 5, 7}
    &[1, 4, 6, 2, 6, 4, 4, 2, 1], // 169: {0, 3, 5, 7}
    &[2, 4, 1, 1, 4, 6, 2, 6, 4], // 170: {1, 3, 5, 7}
    &[], // 171: {0, 1, 3, 5, 7}
    &[1, 4, 6, 1, 6, 0, 0, 6, 4], // 172: {2, 3, 5, 7}
    &[], // 173: {0, 2, 3, 5, 7}
    &[], // 174: {1, 2, 3, 5, 7}
    &[], // 175: {0, 1, 2, 3, 5, 7}
    &[3, 6, 0, 0, 6, 1], // 176: {4, 5, 7}
    &[3, 6, 1], // 177: {0, 4, 5, 7}
    &[3, 6, 0, 0, 6, 2], // 178: {1, 4, 5, 7}
    &[3, 6, 2], // 179: {0, 1, 4, 5, 7}
    &[3, 6, 0, 0, 6, 1, 1, 6, 3], // 180: {2, 4, 5, 7}
    &[], // 181: {0, 2, 4, 5, 7}
    &[], // 182: {1, 2, 4, 5, 7}
    &[], // 183: {0, 1, 2, 4, 5, 7}
    &[0, 6, 1, 2, 6, 0], // 184: {3, 4, 5, 7}
    &[2, 6, 1], // 185: {0, 3, 4, 5, 7}
    &[], // 186: {1, 3, 4, 5, 7}
    &[], // 187: {0, 1, 3, 4, 5, 7}
    &[], // 188: {2, 3, 4, 5, 7}
    &[], // 189: {0, 2, 3, 4, 5, 7}
    &[], // 190: {1, 2, 3, 4, 5, 7}
    &[], // 191: {0, 1, 2, 3, 4, 5, 7}
    &[2, 5, 3, 3, 5, 4], // 192: {6, 7}
    &[2, 5, 3, 3, 5, 4, 3, 4, 1], // 193: {0, 6, 7}
    &[2, 5, 3, 3, 5, 4, 0, 5, 2], // 194: {1, 6, 7}
    &[], // 195: {0, 1, 6, 7}
    &[1, 5, 3, 3, 5, 4], // 196: {2, 6, 7}
    &[1, 5, 3, 3, 5, 4, 3, 4, 1], // 197: {0, 2, 6, 7}
    &[0, 5, 3, 3, 5, 4], // 198: {1, 2, 6, 7}
    &[], // 199: {0, 1, 2, 6, 7}
    &[2, 5, 4, 2, 4, 0], // 200: {3, 6, 7}
    &[2, 5, 4, 2, 4, 1], // 201: {0, 3, 6, 7}
    &[0, 5, 2, 2, 5, 4], // 202: {1, 3, 6, 7}
    &[], // 203: {0, 1, 3, 6, 7}
    &[1, 5, 0, 0, 5, 4], // 204: {2, 3, 6, 7}
    &[1, 5, 4], // 205: {0, 2, 3, 6, 7}
    &[0, 5, 4], // 206: {1, 2, 3, 6, 7}
    &[], // 207: {0, 1, 2, 3, 6, 7}
    &[2, 5, 3, 3, 5, 0], // 208: {4, 6, 7}
    &[2, 5, 3, 3, 5, 1], // 209: {0, 4, 6, 7}
    &[0, 5, 2, 2, 5, 3, 3, 5, 0], // 210: {1, 4, 6, 7}
    &[], // 211: {0, 1, 4, 6, 7}
    &[1, 5, 3, 3, 5, 0], // 212: {2, 4, 6, 7}
    &[], // 213: {0, 2, 4, 6, 7}
    &[], // 214: {1, 2, 4, 6, 7}
    &[], // 215: {0, 1, 2, 4, 6, 7}
    &[2, 5, 0], // 216: {3, 4, 6, 7}
    &[2, 5, 1], // 217: {0, 3, 4, 6, 7}
    &[], // 218: {1, 3, 4, 6, 7}
    &[], // 219: {0, 1, 3, 4, 6, 7}
    &[1, 5, 0], // 220: {2, 3, 4, 6, 7}
    &[], // 221: {0, 2, 3, 4, 6, 7}
    &[], // 222: {1, 2, 3, 4, 6, 7}
    &[], // 223: {0, 1, 2, 3, 4, 6, 7}
    &[1, 4, 2, 2, 4, 3], // 224: {5, 6, 7}
    &[1, 4, 2, 2, 4, 3, 3, 4, 1], // 225: {0, 5, 6, 7}
    &[0, 4, 2, 2, 4, 3], // 226: {1, 5, 6, 7}
    &[], // 227: {0, 1, 5, 6, 7}
    &[1, 4, 3], // 228: {2, 5, 6, 7}
    &[], // 229: {0, 2, 5, 6, 7}
    &[0, 4, 3], // 230: {1, 2, 5, 6, 7}
    &[], // 231: {0, 1, 2, 5, 6, 7}
    &[1, 4, 2, 2, 4, 0], // 232: {3, 5, 6, 7}
    &[], // 233: {0, 3, 5, 6, 7}
    &[], // 234: {1, 3, 5, 6, 7}
    &[], // 235: {0, 1, 3, 5, 6, 7}
    &[1, 4, 0], // 236: {2, 3, 5, 6, 7}
    &[], // 237: {0, 2, 3, 5, 6, 7}
    &[], // 238: {1, 2, 3, 5, 6, 7}
    &[], // 239: {0, 1, 2, 3, 5, 6, 7}
    &[3, 2, 0, 0, 2, 1], // 240: {4, 5, 6, 7}
    &[3, 2, 1], // 241: {0, 4, 5, 6, 7}
    &[3, 2, 0], // 242: {1, 4, 5, 6, 7}
    &[], // 243: {0, 1, 4, 5, 6, 7}
    &[3, 1, 0], // 244: {2, 4, 5, 6, 7}
    &[], // 245: {0, 2, 4, 5, 6, 7}
    &[], // 246: {1, 2, 4, 5, 6, 7}
    &[], // 247: {0, 1, 2, 4, 5, 6, 7}
    &[0, 2, 1], // 248: {3, 4, 5, 6, 7}
    &[], // 249: {0, 3, 4, 5, 6, 7}
    &[], // 250: {1, 3, 4, 5, 6, 7}
    &[], // 251: {0, 1, 3, 4, 5, 6, 7}
    &[], // 252: {2, 3, 4, 5, 6, 7}
    &[], // 253: {0, 2, 3, 4, 5, 6, 7}
    &[], // 254: {1, 2, 3, 4, 5, 6, 7}
    &[], // 255: {0, 1, 2, 3, 4, 5, 6, 7}
];

/// Looks up the triangle corner indices for an occupancy code.
///
/// # Arguments
/// * `code` - The corner-occupancy code of a voxel
///
/// # Returns
/// The ordered corner indices, three per triangle. Empty for unresolved configurations.
pub fn lookup(code: u8) -> &'static [u8] {
    TRIANGULATION_TABLE[code as usize]
}

/// The triangle vertices of an occupancy code in local (0..1) cube space.
pub fn local_points(code: u8) -> impl Iterator<Item = Point3<f32>> {
    lookup(code).iter().map(|&index| {
        // Table entries only ever reference corners 0..8.
        Corner::ALL[index as usize].local_point()
    })
}

/// Number of triangles produced by an occupancy code.
pub fn triangle_count(code: u8) -> usize {
    lookup(code).len() / 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_holds_whole_triangles() {
        for code in 0..=u8::MAX {
            assert_eq!(lookup(code).len() % 3, 0, "code {code}");
        }
    }

    #[test]
    fn every_index_is_a_corner() {
        for code in 0..=u8::MAX {
            assert!(lookup(code).iter().all(|&index| index < 8), "code {code}");
        }
    }

    #[test]
    fn no_triangle_repeats_a_corner() {
        for code in 0..=u8::MAX {
            for triangle in lookup(code).chunks(3) {
                assert!(
                    triangle[0] != triangle[1]
                        && triangle[1] != triangle[2]
                        && triangle[0] != triangle[2],
                    "code {code}: {triangle:?}"
                );
            }
        }
    }

    #[test]
    fn fully_exposed_and_fully_buried_cells_are_empty() {
        assert!(lookup(0).is_empty());
        assert!(lookup(255).is_empty());
    }

    #[test]
    fn flat_top_cell_is_the_top_face() {
        assert_eq!(lookup(15), &[4, 5, 7, 7, 5, 6]);
        assert!(local_points(15).all(|point| point.y == 1.0));
        assert_eq!(triangle_count(15), 2);
    }

    #[test]
    fn unresolved_configurations_stay_empty() {
        let empty = (0..=u8::MAX).filter(|&code| lookup(code).is_empty()).count();
        assert_eq!(empty, 76);
        // Intersecting-square cases.
        assert!(lookup(60).is_empty());
        assert!(lookup(85).is_empty());
        assert!(lookup(195).is_empty());
    }

    #[test]
    fn table_holds_every_triangle() {
        let indices: usize = TRIANGULATION_TABLE.iter().map(|entry| entry.len()).sum();
        assert_eq!(indices, 1122);
    }
}
