use once_cell::sync::Lazy;
use phf::phf_map;

use crate::mcs51::Mcs51;

/// Per-opcode metadata. The actor is the semantic handler invoked at phase
/// S4P2 of the first machine cycle of the instruction; it consumes its own
/// operand bytes from PC. `bytes` is only needed for display since the
/// actors pop their arguments themselves.
#[derive(Clone, Copy)]
pub struct Opcode {
    pub code: u8,
    pub bytes: u8,
    pub cycles: u8,
    pub mnemonic: &'static str,
    // Function pointer to the instruction handler
    pub actor: fn(&mut Mcs51),
}

// List of all implemented opcodes and their corresponding Opcode definitions.
// Lengths and machine cycle counts follow the MCS-51 datasheet. Register
// families with a regular encoding (Rn in the low three bits, @Ri in the low
// bit) share one actor that decodes the register from the opcode byte.
static OPCODE_TABLE: phf::Map<u8, Opcode> = phf_map! {
    0x00u8 => Opcode { code: 0x00, bytes: 1, cycles: 1, mnemonic: "NOP", actor: Mcs51::handle_nop },

    // Unconditional jumps and calls
    0x01u8 => Opcode { code: 0x01, bytes: 2, cycles: 2, mnemonic: "AJMP addr11", actor: Mcs51::handle_ajmp },
    0x21u8 => Opcode { code: 0x21, bytes: 2, cycles: 2, mnemonic: "AJMP addr11", actor: Mcs51::handle_ajmp },
    0x41u8 => Opcode { code: 0x41, bytes: 2, cycles: 2, mnemonic: "AJMP addr11", actor: Mcs51::handle_ajmp },
    0x61u8 => Opcode { code: 0x61, bytes: 2, cycles: 2, mnemonic: "AJMP addr11", actor: Mcs51::handle_ajmp },
    0x81u8 => Opcode { code: 0x81, bytes: 2, cycles: 2, mnemonic: "AJMP addr11", actor: Mcs51::handle_ajmp },
    0xA1u8 => Opcode { code: 0xA1, bytes: 2, cycles: 2, mnemonic: "AJMP addr11", actor: Mcs51::handle_ajmp },
    0xC1u8 => Opcode { code: 0xC1, bytes: 2, cycles: 2, mnemonic: "AJMP addr11", actor: Mcs51::handle_ajmp },
    0xE1u8 => Opcode { code: 0xE1, bytes: 2, cycles: 2, mnemonic: "AJMP addr11", actor: Mcs51::handle_ajmp },
    0x02u8 => Opcode { code: 0x02, bytes: 3, cycles: 2, mnemonic: "LJMP addr16", actor: Mcs51::handle_ljmp },
    0x11u8 => Opcode { code: 0x11, bytes: 2, cycles: 2, mnemonic: "ACALL addr11", actor: Mcs51::handle_acall },
    0x31u8 => Opcode { code: 0x31, bytes: 2, cycles: 2, mnemonic: "ACALL addr11", actor: Mcs51::handle_acall },
    0x51u8 => Opcode { code: 0x51, bytes: 2, cycles: 2, mnemonic: "ACALL addr11", actor: Mcs51::handle_acall },
    0x71u8 => Opcode { code: 0x71, bytes: 2, cycles: 2, mnemonic: "ACALL addr11", actor: Mcs51::handle_acall },
    0x91u8 => Opcode { code: 0x91, bytes: 2, cycles: 2, mnemonic: "ACALL addr11", actor: Mcs51::handle_acall },
    0xB1u8 => Opcode { code: 0xB1, bytes: 2, cycles: 2, mnemonic: "ACALL addr11", actor: Mcs51::handle_acall },
    0xD1u8 => Opcode { code: 0xD1, bytes: 2, cycles: 2, mnemonic: "ACALL addr11", actor: Mcs51::handle_acall },
    0xF1u8 => Opcode { code: 0xF1, bytes: 2, cycles: 2, mnemonic: "ACALL addr11", actor: Mcs51::handle_acall },
    0x12u8 => Opcode { code: 0x12, bytes: 3, cycles: 2, mnemonic: "LCALL addr16", actor: Mcs51::handle_lcall },
    0x22u8 => Opcode { code: 0x22, bytes: 1, cycles: 2, mnemonic: "RET", actor: Mcs51::handle_ret },
    0x32u8 => Opcode { code: 0x32, bytes: 1, cycles: 2, mnemonic: "RETI", actor: Mcs51::handle_reti },
    0x80u8 => Opcode { code: 0x80, bytes: 2, cycles: 2, mnemonic: "SJMP offset", actor: Mcs51::handle_sjmp },

    // INC Instructions
    0x04u8 => Opcode { code: 0x04, bytes: 1, cycles: 1, mnemonic: "INC A", actor: Mcs51::handle_inc_a },
    0x05u8 => Opcode { code: 0x05, bytes: 2, cycles: 1, mnemonic: "INC direct", actor: Mcs51::handle_inc_direct },
    0x06u8 => Opcode { code: 0x06, bytes: 1, cycles: 1, mnemonic: "INC @R0", actor: Mcs51::handle_inc_at_ri },
    0x07u8 => Opcode { code: 0x07, bytes: 1, cycles: 1, mnemonic: "INC @R1", actor: Mcs51::handle_inc_at_ri },
    0x08u8 => Opcode { code: 0x08, bytes: 1, cycles: 1, mnemonic: "INC R0", actor: Mcs51::handle_inc_rn },
    0x09u8 => Opcode { code: 0x09, bytes: 1, cycles: 1, mnemonic: "INC R1", actor: Mcs51::handle_inc_rn },
    0x0Au8 => Opcode { code: 0x0A, bytes: 1, cycles: 1, mnemonic: "INC R2", actor: Mcs51::handle_inc_rn },
    0x0Bu8 => Opcode { code: 0x0B, bytes: 1, cycles: 1, mnemonic: "INC R3", actor: Mcs51::handle_inc_rn },
    0x0Cu8 => Opcode { code: 0x0C, bytes: 1, cycles: 1, mnemonic: "INC R4", actor: Mcs51::handle_inc_rn },
    0x0Du8 => Opcode { code: 0x0D, bytes: 1, cycles: 1, mnemonic: "INC R5", actor: Mcs51::handle_inc_rn },
    0x0Eu8 => Opcode { code: 0x0E, bytes: 1, cycles: 1, mnemonic: "INC R6", actor: Mcs51::handle_inc_rn },
    0x0Fu8 => Opcode { code: 0x0F, bytes: 1, cycles: 1, mnemonic: "INC R7", actor: Mcs51::handle_inc_rn },
    0xA3u8 => Opcode { code: 0xA3, bytes: 1, cycles: 2, mnemonic: "INC DPTR", actor: Mcs51::handle_inc_dptr },

    // DEC Instructions
    0x14u8 => Opcode { code: 0x14, bytes: 1, cycles: 1, mnemonic: "DEC A", actor: Mcs51::handle_dec_a },
    0x15u8 => Opcode { code: 0x15, bytes: 2, cycles: 1, mnemonic: "DEC direct", actor: Mcs51::handle_dec_direct },
    0x16u8 => Opcode { code: 0x16, bytes: 1, cycles: 1, mnemonic: "DEC @R0", actor: Mcs51::handle_dec_at_ri },
    0x17u8 => Opcode { code: 0x17, bytes: 1, cycles: 1, mnemonic: "DEC @R1", actor: Mcs51::handle_dec_at_ri },
    0x18u8 => Opcode { code: 0x18, bytes: 1, cycles: 1, mnemonic: "DEC R0", actor: Mcs51::handle_dec_rn },
    0x19u8 => Opcode { code: 0x19, bytes: 1, cycles: 1, mnemonic: "DEC R1", actor: Mcs51::handle_dec_rn },
    0x1Au8 => Opcode { code: 0x1A, bytes: 1, cycles: 1, mnemonic: "DEC R2", actor: Mcs51::handle_dec_rn },
    0x1Bu8 => Opcode { code: 0x1B, bytes: 1, cycles: 1, mnemonic: "DEC R3", actor: Mcs51::handle_dec_rn },
    0x1Cu8 => Opcode { code: 0x1C, bytes: 1, cycles: 1, mnemonic: "DEC R4", actor: Mcs51::handle_dec_rn },
    0x1Du8 => Opcode { code: 0x1D, bytes: 1, cycles: 1, mnemonic: "DEC R5", actor: Mcs51::handle_dec_rn },
    0x1Eu8 => Opcode { code: 0x1E, bytes: 1, cycles: 1, mnemonic: "DEC R6", actor: Mcs51::handle_dec_rn },
    0x1Fu8 => Opcode { code: 0x1F, bytes: 1, cycles: 1, mnemonic: "DEC R7", actor: Mcs51::handle_dec_rn },

    // ADD Instructions
    0x24u8 => Opcode { code: 0x24, bytes: 2, cycles: 1, mnemonic: "ADD A, #immed", actor: Mcs51::handle_add_a_immed },
    0x25u8 => Opcode { code: 0x25, bytes: 2, cycles: 1, mnemonic: "ADD A, direct", actor: Mcs51::handle_add_a_direct },
    0x26u8 => Opcode { code: 0x26, bytes: 1, cycles: 1, mnemonic: "ADD A, @R0", actor: Mcs51::handle_add_a_at_ri },
    0x27u8 => Opcode { code: 0x27, bytes: 1, cycles: 1, mnemonic: "ADD A, @R1", actor: Mcs51::handle_add_a_at_ri },
    0x28u8 => Opcode { code: 0x28, bytes: 1, cycles: 1, mnemonic: "ADD A, R0", actor: Mcs51::handle_add_a_rn },
    0x29u8 => Opcode { code: 0x29, bytes: 1, cycles: 1, mnemonic: "ADD A, R1", actor: Mcs51::handle_add_a_rn },
    0x2Au8 => Opcode { code: 0x2A, bytes: 1, cycles: 1, mnemonic: "ADD A, R2", actor: Mcs51::handle_add_a_rn },
    0x2Bu8 => Opcode { code: 0x2B, bytes: 1, cycles: 1, mnemonic: "ADD A, R3", actor: Mcs51::handle_add_a_rn },
    0x2Cu8 => Opcode { code: 0x2C, bytes: 1, cycles: 1, mnemonic: "ADD A, R4", actor: Mcs51::handle_add_a_rn },
    0x2Du8 => Opcode { code: 0x2D, bytes: 1, cycles: 1, mnemonic: "ADD A, R5", actor: Mcs51::handle_add_a_rn },
    0x2Eu8 => Opcode { code: 0x2E, bytes: 1, cycles: 1, mnemonic: "ADD A, R6", actor: Mcs51::handle_add_a_rn },
    0x2Fu8 => Opcode { code: 0x2F, bytes: 1, cycles: 1, mnemonic: "ADD A, R7", actor: Mcs51::handle_add_a_rn },

    // SUBB Instructions
    0x94u8 => Opcode { code: 0x94, bytes: 2, cycles: 1, mnemonic: "SUBB A, #immed", actor: Mcs51::handle_subb_a_immed },
    0x95u8 => Opcode { code: 0x95, bytes: 2, cycles: 1, mnemonic: "SUBB A, direct", actor: Mcs51::handle_subb_a_direct },
    0x96u8 => Opcode { code: 0x96, bytes: 1, cycles: 1, mnemonic: "SUBB A, @R0", actor: Mcs51::handle_subb_a_at_ri },
    0x97u8 => Opcode { code: 0x97, bytes: 1, cycles: 1, mnemonic: "SUBB A, @R1", actor: Mcs51::handle_subb_a_at_ri },
    0x98u8 => Opcode { code: 0x98, bytes: 1, cycles: 1, mnemonic: "SUBB A, R0", actor: Mcs51::handle_subb_a_rn },
    0x99u8 => Opcode { code: 0x99, bytes: 1, cycles: 1, mnemonic: "SUBB A, R1", actor: Mcs51::handle_subb_a_rn },
    0x9Au8 => Opcode { code: 0x9A, bytes: 1, cycles: 1, mnemonic: "SUBB A, R2", actor: Mcs51::handle_subb_a_rn },
    0x9Bu8 => Opcode { code: 0x9B, bytes: 1, cycles: 1, mnemonic: "SUBB A, R3", actor: Mcs51::handle_subb_a_rn },
    0x9Cu8 => Opcode { code: 0x9C, bytes: 1, cycles: 1, mnemonic: "SUBB A, R4", actor: Mcs51::handle_subb_a_rn },
    0x9Du8 => Opcode { code: 0x9D, bytes: 1, cycles: 1, mnemonic: "SUBB A, R5", actor: Mcs51::handle_subb_a_rn },
    0x9Eu8 => Opcode { code: 0x9E, bytes: 1, cycles: 1, mnemonic: "SUBB A, R6", actor: Mcs51::handle_subb_a_rn },
    0x9Fu8 => Opcode { code: 0x9F, bytes: 1, cycles: 1, mnemonic: "SUBB A, R7", actor: Mcs51::handle_subb_a_rn },

    // MUL Instructions
    0xA4u8 => Opcode { code: 0xA4, bytes: 1, cycles: 4, mnemonic: "MUL AB", actor: Mcs51::handle_mul_ab },

    // ORL Instructions
    0x42u8 => Opcode { code: 0x42, bytes: 2, cycles: 1, mnemonic: "ORL direct, A", actor: Mcs51::handle_orl_direct_a },
    0x43u8 => Opcode { code: 0x43, bytes: 3, cycles: 2, mnemonic: "ORL direct, #immed", actor: Mcs51::handle_orl_direct_immed },
    0x44u8 => Opcode { code: 0x44, bytes: 2, cycles: 1, mnemonic: "ORL A, #immed", actor: Mcs51::handle_orl_a_immed },
    0x45u8 => Opcode { code: 0x45, bytes: 2, cycles: 1, mnemonic: "ORL A, direct", actor: Mcs51::handle_orl_a_direct },
    0x46u8 => Opcode { code: 0x46, bytes: 1, cycles: 1, mnemonic: "ORL A, @R0", actor: Mcs51::handle_orl_a_at_ri },
    0x47u8 => Opcode { code: 0x47, bytes: 1, cycles: 1, mnemonic: "ORL A, @R1", actor: Mcs51::handle_orl_a_at_ri },
    0x48u8 => Opcode { code: 0x48, bytes: 1, cycles: 1, mnemonic: "ORL A, R0", actor: Mcs51::handle_orl_a_rn },
    0x49u8 => Opcode { code: 0x49, bytes: 1, cycles: 1, mnemonic: "ORL A, R1", actor: Mcs51::handle_orl_a_rn },
    0x4Au8 => Opcode { code: 0x4A, bytes: 1, cycles: 1, mnemonic: "ORL A, R2", actor: Mcs51::handle_orl_a_rn },
    0x4Bu8 => Opcode { code: 0x4B, bytes: 1, cycles: 1, mnemonic: "ORL A, R3", actor: Mcs51::handle_orl_a_rn },
    0x4Cu8 => Opcode { code: 0x4C, bytes: 1, cycles: 1, mnemonic: "ORL A, R4", actor: Mcs51::handle_orl_a_rn },
    0x4Du8 => Opcode { code: 0x4D, bytes: 1, cycles: 1, mnemonic: "ORL A, R5", actor: Mcs51::handle_orl_a_rn },
    0x4Eu8 => Opcode { code: 0x4E, bytes: 1, cycles: 1, mnemonic: "ORL A, R6", actor: Mcs51::handle_orl_a_rn },
    0x4Fu8 => Opcode { code: 0x4F, bytes: 1, cycles: 1, mnemonic: "ORL A, R7", actor: Mcs51::handle_orl_a_rn },

    // ANL Instructions
    0x52u8 => Opcode { code: 0x52, bytes: 2, cycles: 1, mnemonic: "ANL direct, A", actor: Mcs51::handle_anl_direct_a },
    0x53u8 => Opcode { code: 0x53, bytes: 3, cycles: 2, mnemonic: "ANL direct, #immed", actor: Mcs51::handle_anl_direct_immed },
    0x54u8 => Opcode { code: 0x54, bytes: 2, cycles: 1, mnemonic: "ANL A, #immed", actor: Mcs51::handle_anl_a_immed },
    0x55u8 => Opcode { code: 0x55, bytes: 2, cycles: 1, mnemonic: "ANL A, direct", actor: Mcs51::handle_anl_a_direct },
    0x56u8 => Opcode { code: 0x56, bytes: 1, cycles: 1, mnemonic: "ANL A, @R0", actor: Mcs51::handle_anl_a_at_ri },
    0x57u8 => Opcode { code: 0x57, bytes: 1, cycles: 1, mnemonic: "ANL A, @R1", actor: Mcs51::handle_anl_a_at_ri },
    0x58u8 => Opcode { code: 0x58, bytes: 1, cycles: 1, mnemonic: "ANL A, R0", actor: Mcs51::handle_anl_a_rn },
    0x59u8 => Opcode { code: 0x59, bytes: 1, cycles: 1, mnemonic: "ANL A, R1", actor: Mcs51::handle_anl_a_rn },
    0x5Au8 => Opcode { code: 0x5A, bytes: 1, cycles: 1, mnemonic: "ANL A, R2", actor: Mcs51::handle_anl_a_rn },
    0x5Bu8 => Opcode { code: 0x5B, bytes: 1, cycles: 1, mnemonic: "ANL A, R3", actor: Mcs51::handle_anl_a_rn },
    0x5Cu8 => Opcode { code: 0x5C, bytes: 1, cycles: 1, mnemonic: "ANL A, R4", actor: Mcs51::handle_anl_a_rn },
    0x5Du8 => Opcode { code: 0x5D, bytes: 1, cycles: 1, mnemonic: "ANL A, R5", actor: Mcs51::handle_anl_a_rn },
    0x5Eu8 => Opcode { code: 0x5E, bytes: 1, cycles: 1, mnemonic: "ANL A, R6", actor: Mcs51::handle_anl_a_rn },
    0x5Fu8 => Opcode { code: 0x5F, bytes: 1, cycles: 1, mnemonic: "ANL A, R7", actor: Mcs51::handle_anl_a_rn },
    0xB0u8 => Opcode { code: 0xB0, bytes: 2, cycles: 2, mnemonic: "ANL C, /bit", actor: Mcs51::handle_anl_c_not_bit },

    // XRL Instructions
    0x62u8 => Opcode { code: 0x62, bytes: 2, cycles: 1, mnemonic: "XRL direct, A", actor: Mcs51::handle_xrl_direct_a },
    0x63u8 => Opcode { code: 0x63, bytes: 3, cycles: 2, mnemonic: "XRL direct, #immed", actor: Mcs51::handle_xrl_direct_immed },
    0x64u8 => Opcode { code: 0x64, bytes: 2, cycles: 1, mnemonic: "XRL A, #immed", actor: Mcs51::handle_xrl_a_immed },
    0x65u8 => Opcode { code: 0x65, bytes: 2, cycles: 1, mnemonic: "XRL A, direct", actor: Mcs51::handle_xrl_a_direct },
    0x66u8 => Opcode { code: 0x66, bytes: 1, cycles: 1, mnemonic: "XRL A, @R0", actor: Mcs51::handle_xrl_a_at_ri },
    0x67u8 => Opcode { code: 0x67, bytes: 1, cycles: 1, mnemonic: "XRL A, @R1", actor: Mcs51::handle_xrl_a_at_ri },
    0x68u8 => Opcode { code: 0x68, bytes: 1, cycles: 1, mnemonic: "XRL A, R0", actor: Mcs51::handle_xrl_a_rn },
    0x69u8 => Opcode { code: 0x69, bytes: 1, cycles: 1, mnemonic: "XRL A, R1", actor: Mcs51::handle_xrl_a_rn },
    0x6Au8 => Opcode { code: 0x6A, bytes: 1, cycles: 1, mnemonic: "XRL A, R2", actor: Mcs51::handle_xrl_a_rn },
    0x6Bu8 => Opcode { code: 0x6B, bytes: 1, cycles: 1, mnemonic: "XRL A, R3", actor: Mcs51::handle_xrl_a_rn },
    0x6Cu8 => Opcode { code: 0x6C, bytes: 1, cycles: 1, mnemonic: "XRL A, R4", actor: Mcs51::handle_xrl_a_rn },
    0x6Du8 => Opcode { code: 0x6D, bytes: 1, cycles: 1, mnemonic: "XRL A, R5", actor: Mcs51::handle_xrl_a_rn },
    0x6Eu8 => Opcode { code: 0x6E, bytes: 1, cycles: 1, mnemonic: "XRL A, R6", actor: Mcs51::handle_xrl_a_rn },
    0x6Fu8 => Opcode { code: 0x6F, bytes: 1, cycles: 1, mnemonic: "XRL A, R7", actor: Mcs51::handle_xrl_a_rn },

    // MOV Instructions
    0x74u8 => Opcode { code: 0x74, bytes: 2, cycles: 1, mnemonic: "MOV A, #immed", actor: Mcs51::handle_mov_a_immed },
    0x75u8 => Opcode { code: 0x75, bytes: 3, cycles: 2, mnemonic: "MOV direct, #immed", actor: Mcs51::handle_mov_direct_immed },
    0x76u8 => Opcode { code: 0x76, bytes: 2, cycles: 1, mnemonic: "MOV @R0, #immed", actor: Mcs51::handle_mov_at_ri_immed },
    0x77u8 => Opcode { code: 0x77, bytes: 2, cycles: 1, mnemonic: "MOV @R1, #immed", actor: Mcs51::handle_mov_at_ri_immed },
    0x78u8 => Opcode { code: 0x78, bytes: 2, cycles: 1, mnemonic: "MOV R0, #immed", actor: Mcs51::handle_mov_rn_immed },
    0x79u8 => Opcode { code: 0x79, bytes: 2, cycles: 1, mnemonic: "MOV R1, #immed", actor: Mcs51::handle_mov_rn_immed },
    0x7Au8 => Opcode { code: 0x7A, bytes: 2, cycles: 1, mnemonic: "MOV R2, #immed", actor: Mcs51::handle_mov_rn_immed },
    0x7Bu8 => Opcode { code: 0x7B, bytes: 2, cycles: 1, mnemonic: "MOV R3, #immed", actor: Mcs51::handle_mov_rn_immed },
    0x7Cu8 => Opcode { code: 0x7C, bytes: 2, cycles: 1, mnemonic: "MOV R4, #immed", actor: Mcs51::handle_mov_rn_immed },
    0x7Du8 => Opcode { code: 0x7D, bytes: 2, cycles: 1, mnemonic: "MOV R5, #immed", actor: Mcs51::handle_mov_rn_immed },
    0x7Eu8 => Opcode { code: 0x7E, bytes: 2, cycles: 1, mnemonic: "MOV R6, #immed", actor: Mcs51::handle_mov_rn_immed },
    0x7Fu8 => Opcode { code: 0x7F, bytes: 2, cycles: 1, mnemonic: "MOV R7, #immed", actor: Mcs51::handle_mov_rn_immed },
    0x85u8 => Opcode { code: 0x85, bytes: 3, cycles: 2, mnemonic: "MOV direct, direct", actor: Mcs51::handle_mov_direct_direct },
    0x86u8 => Opcode { code: 0x86, bytes: 2, cycles: 2, mnemonic: "MOV direct, @R0", actor: Mcs51::handle_mov_direct_at_ri },
    0x87u8 => Opcode { code: 0x87, bytes: 2, cycles: 2, mnemonic: "MOV direct, @R1", actor: Mcs51::handle_mov_direct_at_ri },
    0x88u8 => Opcode { code: 0x88, bytes: 2, cycles: 2, mnemonic: "MOV direct, R0", actor: Mcs51::handle_mov_direct_rn },
    0x89u8 => Opcode { code: 0x89, bytes: 2, cycles: 2, mnemonic: "MOV direct, R1", actor: Mcs51::handle_mov_direct_rn },
    0x8Au8 => Opcode { code: 0x8A, bytes: 2, cycles: 2, mnemonic: "MOV direct, R2", actor: Mcs51::handle_mov_direct_rn },
    0x8Bu8 => Opcode { code: 0x8B, bytes: 2, cycles: 2, mnemonic: "MOV direct, R3", actor: Mcs51::handle_mov_direct_rn },
    0x8Cu8 => Opcode { code: 0x8C, bytes: 2, cycles: 2, mnemonic: "MOV direct, R4", actor: Mcs51::handle_mov_direct_rn },
    0x8Du8 => Opcode { code: 0x8D, bytes: 2, cycles: 2, mnemonic: "MOV direct, R5", actor: Mcs51::handle_mov_direct_rn },
    0x8Eu8 => Opcode { code: 0x8E, bytes: 2, cycles: 2, mnemonic: "MOV direct, R6", actor: Mcs51::handle_mov_direct_rn },
    0x8Fu8 => Opcode { code: 0x8F, bytes: 2, cycles: 2, mnemonic: "MOV direct, R7", actor: Mcs51::handle_mov_direct_rn },
    0x90u8 => Opcode { code: 0x90, bytes: 3, cycles: 2, mnemonic: "MOV DPTR, #immed16", actor: Mcs51::handle_mov_dptr_immed },
    0xA2u8 => Opcode { code: 0xA2, bytes: 2, cycles: 1, mnemonic: "MOV C, bit", actor: Mcs51::handle_mov_c_bit },
    0xA6u8 => Opcode { code: 0xA6, bytes: 2, cycles: 2, mnemonic: "MOV @R0, direct", actor: Mcs51::handle_mov_at_ri_direct },
    0xA7u8 => Opcode { code: 0xA7, bytes: 2, cycles: 2, mnemonic: "MOV @R1, direct", actor: Mcs51::handle_mov_at_ri_direct },
    0xA8u8 => Opcode { code: 0xA8, bytes: 2, cycles: 2, mnemonic: "MOV R0, direct", actor: Mcs51::handle_mov_rn_direct },
    0xA9u8 => Opcode { code: 0xA9, bytes: 2, cycles: 2, mnemonic: "MOV R1, direct", actor: Mcs51::handle_mov_rn_direct },
    0xAAu8 => Opcode { code: 0xAA, bytes: 2, cycles: 2, mnemonic: "MOV R2, direct", actor: Mcs51::handle_mov_rn_direct },
    0xABu8 => Opcode { code: 0xAB, bytes: 2, cycles: 2, mnemonic: "MOV R3, direct", actor: Mcs51::handle_mov_rn_direct },
    0xACu8 => Opcode { code: 0xAC, bytes: 2, cycles: 2, mnemonic: "MOV R4, direct", actor: Mcs51::handle_mov_rn_direct },
    0xADu8 => Opcode { code: 0xAD, bytes: 2, cycles: 2, mnemonic: "MOV R5, direct", actor: Mcs51::handle_mov_rn_direct },
    0xAEu8 => Opcode { code: 0xAE, bytes: 2, cycles: 2, mnemonic: "MOV R6, direct", actor: Mcs51::handle_mov_rn_direct },
    0xAFu8 => Opcode { code: 0xAF, bytes: 2, cycles: 2, mnemonic: "MOV R7, direct", actor: Mcs51::handle_mov_rn_direct },
    0xE5u8 => Opcode { code: 0xE5, bytes: 2, cycles: 1, mnemonic: "MOV A, direct", actor: Mcs51::handle_mov_a_direct },
    0xE6u8 => Opcode { code: 0xE6, bytes: 1, cycles: 1, mnemonic: "MOV A, @R0", actor: Mcs51::handle_mov_a_at_ri },
    0xE7u8 => Opcode { code: 0xE7, bytes: 1, cycles: 1, mnemonic: "MOV A, @R1", actor: Mcs51::handle_mov_a_at_ri },
    0xE8u8 => Opcode { code: 0xE8, bytes: 1, cycles: 1, mnemonic: "MOV A, R0", actor: Mcs51::handle_mov_a_rn },
    0xE9u8 => Opcode { code: 0xE9, bytes: 1, cycles: 1, mnemonic: "MOV A, R1", actor: Mcs51::handle_mov_a_rn },
    0xEAu8 => Opcode { code: 0xEA, bytes: 1, cycles: 1, mnemonic: "MOV A, R2", actor: Mcs51::handle_mov_a_rn },
    0xEBu8 => Opcode { code: 0xEB, bytes: 1, cycles: 1, mnemonic: "MOV A, R3", actor: Mcs51::handle_mov_a_rn },
    0xECu8 => Opcode { code: 0xEC, bytes: 1, cycles: 1, mnemonic: "MOV A, R4", actor: Mcs51::handle_mov_a_rn },
    0xEDu8 => Opcode { code: 0xED, bytes: 1, cycles: 1, mnemonic: "MOV A, R5", actor: Mcs51::handle_mov_a_rn },
    0xEEu8 => Opcode { code: 0xEE, bytes: 1, cycles: 1, mnemonic: "MOV A, R6", actor: Mcs51::handle_mov_a_rn },
    0xEFu8 => Opcode { code: 0xEF, bytes: 1, cycles: 1, mnemonic: "MOV A, R7", actor: Mcs51::handle_mov_a_rn },
    0xF5u8 => Opcode { code: 0xF5, bytes: 2, cycles: 1, mnemonic: "MOV direct, A", actor: Mcs51::handle_mov_direct_a },
    0xF6u8 => Opcode { code: 0xF6, bytes: 1, cycles: 1, mnemonic: "MOV @R0, A", actor: Mcs51::handle_mov_at_ri_a },
    0xF7u8 => Opcode { code: 0xF7, bytes: 1, cycles: 1, mnemonic: "MOV @R1, A", actor: Mcs51::handle_mov_at_ri_a },
    0xF8u8 => Opcode { code: 0xF8, bytes: 1, cycles: 1, mnemonic: "MOV R0, A", actor: Mcs51::handle_mov_rn_a },
    0xF9u8 => Opcode { code: 0xF9, bytes: 1, cycles: 1, mnemonic: "MOV R1, A", actor: Mcs51::handle_mov_rn_a },
    0xFAu8 => Opcode { code: 0xFA, bytes: 1, cycles: 1, mnemonic: "MOV R2, A", actor: Mcs51::handle_mov_rn_a },
    0xFBu8 => Opcode { code: 0xFB, bytes: 1, cycles: 1, mnemonic: "MOV R3, A", actor: Mcs51::handle_mov_rn_a },
    0xFCu8 => Opcode { code: 0xFC, bytes: 1, cycles: 1, mnemonic: "MOV R4, A", actor: Mcs51::handle_mov_rn_a },
    0xFDu8 => Opcode { code: 0xFD, bytes: 1, cycles: 1, mnemonic: "MOV R5, A", actor: Mcs51::handle_mov_rn_a },
    0xFEu8 => Opcode { code: 0xFE, bytes: 1, cycles: 1, mnemonic: "MOV R6, A", actor: Mcs51::handle_mov_rn_a },
    0xFFu8 => Opcode { code: 0xFF, bytes: 1, cycles: 1, mnemonic: "MOV R7, A", actor: Mcs51::handle_mov_rn_a },

    // External data and program memory access
    0xE0u8 => Opcode { code: 0xE0, bytes: 1, cycles: 2, mnemonic: "MOVX A, @DPTR", actor: Mcs51::handle_movx_a_at_dptr },
    0xF0u8 => Opcode { code: 0xF0, bytes: 1, cycles: 2, mnemonic: "MOVX @DPTR, A", actor: Mcs51::handle_movx_at_dptr_a },
    0x93u8 => Opcode { code: 0x93, bytes: 1, cycles: 2, mnemonic: "MOVC A, @A+DPTR", actor: Mcs51::handle_movc_a_at_a_plus_dptr },

    // Bit and accumulator manipulation
    0xC2u8 => Opcode { code: 0xC2, bytes: 2, cycles: 1, mnemonic: "CLR bit", actor: Mcs51::handle_clr_bit },
    0xC3u8 => Opcode { code: 0xC3, bytes: 1, cycles: 1, mnemonic: "CLR C", actor: Mcs51::handle_clr_c },
    0xE4u8 => Opcode { code: 0xE4, bytes: 1, cycles: 1, mnemonic: "CLR A", actor: Mcs51::handle_clr_a },
    0xD2u8 => Opcode { code: 0xD2, bytes: 2, cycles: 1, mnemonic: "SETB bit", actor: Mcs51::handle_setb_bit },
    0xD3u8 => Opcode { code: 0xD3, bytes: 1, cycles: 1, mnemonic: "SETB C", actor: Mcs51::handle_setb_c },
    0xB2u8 => Opcode { code: 0xB2, bytes: 2, cycles: 1, mnemonic: "CPL bit", actor: Mcs51::handle_cpl_bit },
    0xC4u8 => Opcode { code: 0xC4, bytes: 1, cycles: 1, mnemonic: "SWAP A", actor: Mcs51::handle_swap_a },
    0x23u8 => Opcode { code: 0x23, bytes: 1, cycles: 1, mnemonic: "RL A", actor: Mcs51::handle_rl_a },

    // Conditional branches
    0x10u8 => Opcode { code: 0x10, bytes: 3, cycles: 2, mnemonic: "JBC bit, offset", actor: Mcs51::handle_jbc },
    0x20u8 => Opcode { code: 0x20, bytes: 3, cycles: 2, mnemonic: "JB bit, offset", actor: Mcs51::handle_jb },
    0x30u8 => Opcode { code: 0x30, bytes: 3, cycles: 2, mnemonic: "JNB bit, offset", actor: Mcs51::handle_jnb },
    0x40u8 => Opcode { code: 0x40, bytes: 2, cycles: 2, mnemonic: "JC offset", actor: Mcs51::handle_jc },
    0x60u8 => Opcode { code: 0x60, bytes: 2, cycles: 2, mnemonic: "JZ offset", actor: Mcs51::handle_jz },
    0x70u8 => Opcode { code: 0x70, bytes: 2, cycles: 2, mnemonic: "JNZ offset", actor: Mcs51::handle_jnz },
    0xB4u8 => Opcode { code: 0xB4, bytes: 3, cycles: 2, mnemonic: "CJNE A, #immed, offset", actor: Mcs51::handle_cjne_a_immed },
    0xB5u8 => Opcode { code: 0xB5, bytes: 3, cycles: 2, mnemonic: "CJNE A, direct, offset", actor: Mcs51::handle_cjne_a_direct },
    0xB6u8 => Opcode { code: 0xB6, bytes: 3, cycles: 2, mnemonic: "CJNE @R0, #immed, offset", actor: Mcs51::handle_cjne_at_ri_immed },
    0xB7u8 => Opcode { code: 0xB7, bytes: 3, cycles: 2, mnemonic: "CJNE @R1, #immed, offset", actor: Mcs51::handle_cjne_at_ri_immed },
    0xB8u8 => Opcode { code: 0xB8, bytes: 3, cycles: 2, mnemonic: "CJNE R0, #immed, offset", actor: Mcs51::handle_cjne_rn_immed },
    0xB9u8 => Opcode { code: 0xB9, bytes: 3, cycles: 2, mnemonic: "CJNE R1, #immed, offset", actor: Mcs51::handle_cjne_rn_immed },
    0xBAu8 => Opcode { code: 0xBA, bytes: 3, cycles: 2, mnemonic: "CJNE R2, #immed, offset", actor: Mcs51::handle_cjne_rn_immed },
    0xBBu8 => Opcode { code: 0xBB, bytes: 3, cycles: 2, mnemonic: "CJNE R3, #immed, offset", actor: Mcs51::handle_cjne_rn_immed },
    0xBCu8 => Opcode { code: 0xBC, bytes: 3, cycles: 2, mnemonic: "CJNE R4, #immed, offset", actor: Mcs51::handle_cjne_rn_immed },
    0xBDu8 => Opcode { code: 0xBD, bytes: 3, cycles: 2, mnemonic: "CJNE R5, #immed, offset", actor: Mcs51::handle_cjne_rn_immed },
    0xBEu8 => Opcode { code: 0xBE, bytes: 3, cycles: 2, mnemonic: "CJNE R6, #immed, offset", actor: Mcs51::handle_cjne_rn_immed },
    0xBFu8 => Opcode { code: 0xBF, bytes: 3, cycles: 2, mnemonic: "CJNE R7, #immed, offset", actor: Mcs51::handle_cjne_rn_immed },
    0xD5u8 => Opcode { code: 0xD5, bytes: 3, cycles: 2, mnemonic: "DJNZ direct, offset", actor: Mcs51::handle_djnz_direct },
    0xD8u8 => Opcode { code: 0xD8, bytes: 2, cycles: 2, mnemonic: "DJNZ R0, offset", actor: Mcs51::handle_djnz_rn },
    0xD9u8 => Opcode { code: 0xD9, bytes: 2, cycles: 2, mnemonic: "DJNZ R1, offset", actor: Mcs51::handle_djnz_rn },
    0xDAu8 => Opcode { code: 0xDA, bytes: 2, cycles: 2, mnemonic: "DJNZ R2, offset", actor: Mcs51::handle_djnz_rn },
    0xDBu8 => Opcode { code: 0xDB, bytes: 2, cycles: 2, mnemonic: "DJNZ R3, offset", actor: Mcs51::handle_djnz_rn },
    0xDCu8 => Opcode { code: 0xDC, bytes: 2, cycles: 2, mnemonic: "DJNZ R4, offset", actor: Mcs51::handle_djnz_rn },
    0xDDu8 => Opcode { code: 0xDD, bytes: 2, cycles: 2, mnemonic: "DJNZ R5, offset", actor: Mcs51::handle_djnz_rn },
    0xDEu8 => Opcode { code: 0xDE, bytes: 2, cycles: 2, mnemonic: "DJNZ R6, offset", actor: Mcs51::handle_djnz_rn },
    0xDFu8 => Opcode { code: 0xDF, bytes: 2, cycles: 2, mnemonic: "DJNZ R7, offset", actor: Mcs51::handle_djnz_rn },

    // Stack
    0xC0u8 => Opcode { code: 0xC0, bytes: 2, cycles: 2, mnemonic: "PUSH direct", actor: Mcs51::handle_push_direct },
    0xD0u8 => Opcode { code: 0xD0, bytes: 2, cycles: 2, mnemonic: "POP direct", actor: Mcs51::handle_pop_direct },
};

/// The dense decode table. Opcodes missing from `OPCODE_TABLE` get the
/// unimplemented actor (fatal or no-op depending on the host policy) so
/// that decode itself is total. `Mcs51::init` copies this into the instance.
pub(crate) static OPCODE_MAP: Lazy<[Opcode; 0x100]> = Lazy::new(|| {
    let mut map = [Opcode {
        code: 0,
        bytes: 1,
        cycles: 1,
        mnemonic: "???",
        actor: Mcs51::handle_unimplemented,
    }; 0x100];

    for (code, entry) in map.iter_mut().enumerate() {
        entry.code = code as u8;
    }

    for (code, opcode) in OPCODE_TABLE.entries() {
        map[*code as usize] = *opcode;
    }

    map
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_map_is_total() {
        assert_eq!(OPCODE_MAP.len(), 256);
        for (i, opcode) in OPCODE_MAP.iter().enumerate() {
            assert_eq!(opcode.code as usize, i);
            assert!(opcode.bytes >= 1 && opcode.bytes <= 3);
            assert!(opcode.cycles >= 1 && opcode.cycles <= 4);
        }
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(OPCODE_MAP[0x00].mnemonic, "NOP");
        assert_eq!(OPCODE_MAP[0x02].bytes, 3);
        assert_eq!(OPCODE_MAP[0x02].cycles, 2);
        assert_eq!(OPCODE_MAP[0xA4].cycles, 4);
        assert_eq!(OPCODE_MAP[0x32].mnemonic, "RETI");
        assert_eq!(OPCODE_MAP[0x03].mnemonic, "???");
    }

    #[test]
    fn test_ajmp_encodings_share_actor() {
        // All eight AJMP pages decode to the same actor with the page bits
        // carried in the opcode byte itself.
        for page in 0u8..8 {
            let code = 0x01 | (page << 5);
            assert_eq!(OPCODE_MAP[code as usize].mnemonic, "AJMP addr11");
            assert_eq!(OPCODE_MAP[code as usize].bytes, 2);
        }
    }
}
