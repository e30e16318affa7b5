// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Capability name tables and alias resolution
//!
//! Terminfo capabilities go by three names: the canonical long name used in
//! documentation and by this crate's maps (`cursor_address`), the terminfo
//! short name used inside compiled databases (`cup`), and the two-character
//! termcap code (`cm`). The tables below list all three for every capability,
//! in the positional order of the binary terminfo format, which is also the
//! order the decoder consumes the boolean/number/string sections in.

/// The three names of one capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    /// Canonical long name, used as the key in capability maps.
    pub name: &'static str,
    /// Terminfo short name.
    pub terminfo: &'static str,
    /// Termcap code.
    pub termcap: &'static str,
}

const fn alias(name: &'static str, terminfo: &'static str, termcap: &'static str) -> Alias {
    Alias { name, terminfo, termcap }
}

/// Boolean capabilities in terminfo order.
pub const BOOLEANS: [Alias; 44] = [
    alias("auto_left_margin", "bw", "bw"),
    alias("auto_right_margin", "am", "am"),
    alias("no_esc_ctlc", "xsb", "xb"),
    alias("ceol_standout_glitch", "xhp", "xs"),
    alias("eat_newline_glitch", "xenl", "xn"),
    alias("erase_overstrike", "eo", "eo"),
    alias("generic_type", "gn", "gn"),
    alias("hard_copy", "hc", "hc"),
    alias("has_meta_key", "km", "km"),
    alias("has_status_line", "hs", "hs"),
    alias("insert_null_glitch", "in", "in"),
    alias("memory_above", "da", "da"),
    alias("memory_below", "db", "db"),
    alias("move_insert_mode", "mir", "mi"),
    alias("move_standout_mode", "msgr", "ms"),
    alias("over_strike", "os", "os"),
    alias("status_line_esc_ok", "eslok", "es"),
    alias("dest_tabs_magic_smso", "xt", "xt"),
    alias("tilde_glitch", "hz", "hz"),
    alias("transparent_underline", "ul", "ul"),
    alias("xon_xoff", "xon", "xo"),
    alias("needs_xon_xoff", "nxon", "nx"),
    alias("prtr_silent", "mc5i", "5i"),
    alias("hard_cursor", "chts", "HC"),
    alias("non_rev_rmcup", "nrrmc", "NR"),
    alias("no_pad_char", "npc", "NP"),
    alias("non_dest_scroll_region", "ndscr", "ND"),
    alias("can_change", "ccc", "cc"),
    alias("back_color_erase", "bce", "ut"),
    alias("hue_lightness_saturation", "hls", "hl"),
    alias("col_addr_glitch", "xhpa", "YA"),
    alias("cr_cancels_micro_mode", "crxm", "YB"),
    alias("has_print_wheel", "daisy", "YC"),
    alias("row_addr_glitch", "xvpa", "YD"),
    alias("semi_auto_right_margin", "sam", "YE"),
    alias("cpi_changes_res", "cpix", "YF"),
    alias("lpi_changes_res", "lpix", "YG"),
    alias("backspaces_with_bs", "OTbs", "bs"),
    alias("crt_no_scrolling", "OTns", "ns"),
    alias("no_correctly_working_cr", "OTnc", "nc"),
    alias("gnu_has_meta_key", "OTMT", "MT"),
    alias("linefeed_is_newline", "OTNL", "NL"),
    alias("has_hardware_tabs", "OTpt", "pt"),
    alias("return_does_clr_eol", "OTxr", "xr"),
];

/// Numeric capabilities in terminfo order.
pub const NUMBERS: [Alias; 39] = [
    alias("columns", "cols", "co"),
    alias("init_tabs", "it", "it"),
    alias("lines", "lines", "li"),
    alias("lines_of_memory", "lm", "lm"),
    alias("magic_cookie_glitch", "xmc", "sg"),
    alias("padding_baud_rate", "pb", "pb"),
    alias("virtual_terminal", "vt", "vt"),
    alias("width_status_line", "wsl", "ws"),
    alias("num_labels", "nlab", "Nl"),
    alias("label_height", "lh", "lh"),
    alias("label_width", "lw", "lw"),
    alias("max_attributes", "ma", "ma"),
    alias("maximum_windows", "wnum", "MW"),
    alias("max_colors", "colors", "Co"),
    alias("max_pairs", "pairs", "pa"),
    alias("no_color_video", "ncv", "NC"),
    alias("buffer_capacity", "bufsz", "Ya"),
    alias("dot_vert_spacing", "spinv", "Yb"),
    alias("dot_horz_spacing", "spinh", "Yc"),
    alias("max_micro_address", "maddr", "Yd"),
    alias("max_micro_jump", "mjump", "Ye"),
    alias("micro_col_size", "mcs", "Yf"),
    alias("micro_line_size", "mls", "Yg"),
    alias("number_of_pins", "npins", "Yh"),
    alias("output_res_char", "orc", "Yi"),
    alias("output_res_line", "orl", "Yj"),
    alias("output_res_horz_inch", "orhi", "Yk"),
    alias("output_res_vert_inch", "orvi", "Yl"),
    alias("print_rate", "cps", "Ym"),
    alias("wide_char_size", "widcs", "Yn"),
    alias("buttons", "btns", "BT"),
    alias("bit_image_entwining", "bitwin", "Yo"),
    alias("bit_image_type", "bitype", "Yp"),
    alias("magic_cookie_glitch_ul", "UTug", "ug"),
    alias("carriage_return_delay", "OTdC", "dC"),
    alias("new_line_delay", "OTdN", "dN"),
    alias("backspace_delay", "OTdB", "dB"),
    alias("horizontal_tab_delay", "OTdT", "dT"),
    alias("number_of_function_keys", "OTkn", "kn"),
];

/// String capabilities in terminfo order.
pub const STRINGS: [Alias; 414] = [
    alias("back_tab", "cbt", "bt"),
    alias("bell", "bel", "bl"),
    alias("carriage_return", "cr", "cr"),
    alias("change_scroll_region", "csr", "cs"),
    alias("clear_all_tabs", "tbc", "ct"),
    alias("clear_screen", "clear", "cl"),
    alias("clr_eol", "el", "ce"),
    alias("clr_eos", "ed", "cd"),
    alias("column_address", "hpa", "ch"),
    alias("command_character", "cmdch", "CC"),
    alias("cursor_address", "cup", "cm"),
    alias("cursor_down", "cud1", "do"),
    alias("cursor_home", "home", "ho"),
    alias("cursor_invisible", "civis", "vi"),
    alias("cursor_left", "cub1", "le"),
    alias("cursor_mem_address", "mrcup", "CM"),
    alias("cursor_normal", "cnorm", "ve"),
    alias("cursor_right", "cuf1", "nd"),
    alias("cursor_to_ll", "ll", "ll"),
    alias("cursor_up", "cuu1", "up"),
    alias("cursor_visible", "cvvis", "vs"),
    alias("delete_character", "dch1", "dc"),
    alias("delete_line", "dl1", "dl"),
    alias("dis_status_line", "dsl", "ds"),
    alias("down_half_line", "hd", "hd"),
    alias("enter_alt_charset_mode", "smacs", "as"),
    alias("enter_blink_mode", "blink", "mb"),
    alias("enter_bold_mode", "bold", "md"),
    alias("enter_ca_mode", "smcup", "ti"),
    alias("enter_delete_mode", "smdc", "dm"),
    alias("enter_dim_mode", "dim", "mh"),
    alias("enter_insert_mode", "smir", "im"),
    alias("enter_secure_mode", "invis", "mk"),
    alias("enter_protected_mode", "prot", "mp"),
    alias("enter_reverse_mode", "rev", "mr"),
    alias("enter_standout_mode", "smso", "so"),
    alias("enter_underline_mode", "smul", "us"),
    alias("erase_chars", "ech", "ec"),
    alias("exit_alt_charset_mode", "rmacs", "ae"),
    alias("exit_attribute_mode", "sgr0", "me"),
    alias("exit_ca_mode", "rmcup", "te"),
    alias("exit_delete_mode", "rmdc", "ed"),
    alias("exit_insert_mode", "rmir", "ei"),
    alias("exit_standout_mode", "rmso", "se"),
    alias("exit_underline_mode", "rmul", "ue"),
    alias("flash_screen", "flash", "vb"),
    alias("form_feed", "ff", "ff"),
    alias("from_status_line", "fsl", "fs"),
    alias("init_1string", "is1", "i1"),
    alias("init_2string", "is2", "is"),
    alias("init_3string", "is3", "i3"),
    alias("init_file", "if", "if"),
    alias("insert_character", "ich1", "ic"),
    alias("insert_line", "il1", "al"),
    alias("insert_padding", "ip", "ip"),
    alias("key_backspace", "kbs", "kb"),
    alias("key_catab", "ktbc", "ka"),
    alias("key_clear", "kclr", "kC"),
    alias("key_ctab", "kctab", "kt"),
    alias("key_dc", "kdch1", "kD"),
    alias("key_dl", "kdl1", "kL"),
    alias("key_down", "kcud1", "kd"),
    alias("key_eic", "krmir", "kM"),
    alias("key_eol", "kel", "kE"),
    alias("key_eos", "ked", "kS"),
    alias("key_f0", "kf0", "k0"),
    alias("key_f1", "kf1", "k1"),
    alias("key_f10", "kf10", "k;"),
    alias("key_f2", "kf2", "k2"),
    alias("key_f3", "kf3", "k3"),
    alias("key_f4", "kf4", "k4"),
    alias("key_f5", "kf5", "k5"),
    alias("key_f6", "kf6", "k6"),
    alias("key_f7", "kf7", "k7"),
    alias("key_f8", "kf8", "k8"),
    alias("key_f9", "kf9", "k9"),
    alias("key_home", "khome", "kh"),
    alias("key_ic", "kich1", "kI"),
    alias("key_il", "kil1", "kA"),
    alias("key_left", "kcub1", "kl"),
    alias("key_ll", "kll", "kH"),
    alias("key_npage", "knp", "kN"),
    alias("key_ppage", "kpp", "kP"),
    alias("key_right", "kcuf1", "kr"),
    alias("key_sf", "kind", "kF"),
    alias("key_sr", "kri", "kR"),
    alias("key_stab", "khts", "kT"),
    alias("key_up", "kcuu1", "ku"),
    alias("keypad_local", "rmkx", "ke"),
    alias("keypad_xmit", "smkx", "ks"),
    alias("lab_f0", "lf0", "l0"),
    alias("lab_f1", "lf1", "l1"),
    alias("lab_f10", "lf10", "la"),
    alias("lab_f2", "lf2", "l2"),
    alias("lab_f3", "lf3", "l3"),
    alias("lab_f4", "lf4", "l4"),
    alias("lab_f5", "lf5", "l5"),
    alias("lab_f6", "lf6", "l6"),
    alias("lab_f7", "lf7", "l7"),
    alias("lab_f8", "lf8", "l8"),
    alias("lab_f9", "lf9", "l9"),
    alias("meta_off", "rmm", "mo"),
    alias("meta_on", "smm", "mm"),
    alias("newline", "nel", "nw"),
    alias("pad_char", "pad", "pc"),
    alias("parm_dch", "dch", "DC"),
    alias("parm_delete_line", "dl", "DL"),
    alias("parm_down_cursor", "cud", "DO"),
    alias("parm_ich", "ich", "IC"),
    alias("parm_index", "indn", "SF"),
    alias("parm_insert_line", "il", "AL"),
    alias("parm_left_cursor", "cub", "LE"),
    alias("parm_right_cursor", "cuf", "RI"),
    alias("parm_rindex", "rin", "SR"),
    alias("parm_up_cursor", "cuu", "UP"),
    alias("pkey_key", "pfkey", "pk"),
    alias("pkey_local", "pfloc", "pl"),
    alias("pkey_xmit", "pfx", "px"),
    alias("print_screen", "mc0", "ps"),
    alias("prtr_off", "mc4", "pf"),
    alias("prtr_on", "mc5", "po"),
    alias("repeat_char", "rep", "rp"),
    alias("reset_1string", "rs1", "r1"),
    alias("reset_2string", "rs2", "r2"),
    alias("reset_3string", "rs3", "r3"),
    alias("reset_file", "rf", "rf"),
    alias("restore_cursor", "rc", "rc"),
    alias("row_address", "vpa", "cv"),
    alias("save_cursor", "sc", "sc"),
    alias("scroll_forward", "ind", "sf"),
    alias("scroll_reverse", "ri", "sr"),
    alias("set_attributes", "sgr", "sa"),
    alias("set_tab", "hts", "st"),
    alias("set_window", "wind", "wi"),
    alias("tab", "ht", "ta"),
    alias("to_status_line", "tsl", "ts"),
    alias("underline_char", "uc", "uc"),
    alias("up_half_line", "hu", "hu"),
    alias("init_prog", "iprog", "iP"),
    alias("key_a1", "ka1", "K1"),
    alias("key_a3", "ka3", "K3"),
    alias("key_b2", "kb2", "K2"),
    alias("key_c1", "kc1", "K4"),
    alias("key_c3", "kc3", "K5"),
    alias("prtr_non", "mc5p", "pO"),
    alias("char_padding", "rmp", "rP"),
    alias("acs_chars", "acsc", "ac"),
    alias("plab_norm", "pln", "pn"),
    alias("key_btab", "kcbt", "kB"),
    alias("enter_xon_mode", "smxon", "SX"),
    alias("exit_xon_mode", "rmxon", "RX"),
    alias("enter_am_mode", "smam", "SA"),
    alias("exit_am_mode", "rmam", "RA"),
    alias("xon_character", "xonc", "XN"),
    alias("xoff_character", "xoffc", "XF"),
    alias("ena_acs", "enacs", "eA"),
    alias("label_on", "smln", "LO"),
    alias("label_off", "rmln", "LF"),
    alias("key_beg", "kbeg", "@1"),
    alias("key_cancel", "kcan", "@2"),
    alias("key_close", "kclo", "@3"),
    alias("key_command", "kcmd", "@4"),
    alias("key_copy", "kcpy", "@5"),
    alias("key_create", "kcrt", "@6"),
    alias("key_end", "kend", "@7"),
    alias("key_enter", "kent", "@8"),
    alias("key_exit", "kext", "@9"),
    alias("key_find", "kfnd", "@0"),
    alias("key_help", "khlp", "%1"),
    alias("key_mark", "kmrk", "%2"),
    alias("key_message", "kmsg", "%3"),
    alias("key_move", "kmov", "%4"),
    alias("key_next", "knxt", "%5"),
    alias("key_open", "kopn", "%6"),
    alias("key_options", "kopt", "%7"),
    alias("key_previous", "kprv", "%8"),
    alias("key_print", "kprt", "%9"),
    alias("key_redo", "krdo", "%0"),
    alias("key_reference", "kref", "&1"),
    alias("key_refresh", "krfr", "&2"),
    alias("key_replace", "krpl", "&3"),
    alias("key_restart", "krst", "&4"),
    alias("key_resume", "kres", "&5"),
    alias("key_save", "ksav", "&6"),
    alias("key_suspend", "kspd", "&7"),
    alias("key_undo", "kund", "&8"),
    alias("key_sbeg", "kBEG", "&9"),
    alias("key_scancel", "kCAN", "&0"),
    alias("key_scommand", "kCMD", "*1"),
    alias("key_scopy", "kCPY", "*2"),
    alias("key_screate", "kCRT", "*3"),
    alias("key_sdc", "kDC", "*4"),
    alias("key_sdl", "kDL", "*5"),
    alias("key_select", "kslt", "*6"),
    alias("key_send", "kEND", "*7"),
    alias("key_seol", "kEOL", "*8"),
    alias("key_sexit", "kEXT", "*9"),
    alias("key_sfind", "kFND", "*0"),
    alias("key_shelp", "kHLP", "#1"),
    alias("key_shome", "kHOM", "#2"),
    alias("key_sic", "kIC", "#3"),
    alias("key_sleft", "kLFT", "#4"),
    alias("key_smessage", "kMSG", "%a"),
    alias("key_smove", "kMOV", "%b"),
    alias("key_snext", "kNXT", "%c"),
    alias("key_soptions", "kOPT", "%d"),
    alias("key_sprevious", "kPRV", "%e"),
    alias("key_sprint", "kPRT", "%f"),
    alias("key_sredo", "kRDO", "%g"),
    alias("key_sreplace", "kRPL", "%h"),
    alias("key_sright", "kRIT", "%i"),
    alias("key_srsume", "kRES", "%j"),
    alias("key_ssave", "kSAV", "!1"),
    alias("key_ssuspend", "kSPD", "!2"),
    alias("key_sundo", "kUND", "!3"),
    alias("req_for_input", "rfi", "RF"),
    alias("key_f11", "kf11", "F1"),
    alias("key_f12", "kf12", "F2"),
    alias("key_f13", "kf13", "F3"),
    alias("key_f14", "kf14", "F4"),
    alias("key_f15", "kf15", "F5"),
    alias("key_f16", "kf16", "F6"),
    alias("key_f17", "kf17", "F7"),
    alias("key_f18", "kf18", "F8"),
    alias("key_f19", "kf19", "F9"),
    alias("key_f20", "kf20", "FA"),
    alias("key_f21", "kf21", "FB"),
    alias("key_f22", "kf22", "FC"),
    alias("key_f23", "kf23", "FD"),
    alias("key_f24", "kf24", "FE"),
    alias("key_f25", "kf25", "FF"),
    alias("key_f26", "kf26", "FG"),
    alias("key_f27", "kf27", "FH"),
    alias("key_f28", "kf28", "FI"),
    alias("key_f29", "kf29", "FJ"),
    alias("key_f30", "kf30", "FK"),
    alias("key_f31", "kf31", "FL"),
    alias("key_f32", "kf32", "FM"),
    alias("key_f33", "kf33", "FN"),
    alias("key_f34", "kf34", "FO"),
    alias("key_f35", "kf35", "FP"),
    alias("key_f36", "kf36", "FQ"),
    alias("key_f37", "kf37", "FR"),
    alias("key_f38", "kf38", "FS"),
    alias("key_f39", "kf39", "FT"),
    alias("key_f40", "kf40", "FU"),
    alias("key_f41", "kf41", "FV"),
    alias("key_f42", "kf42", "FW"),
    alias("key_f43", "kf43", "FX"),
    alias("key_f44", "kf44", "FY"),
    alias("key_f45", "kf45", "FZ"),
    alias("key_f46", "kf46", "Fa"),
    alias("key_f47", "kf47", "Fb"),
    alias("key_f48", "kf48", "Fc"),
    alias("key_f49", "kf49", "Fd"),
    alias("key_f50", "kf50", "Fe"),
    alias("key_f51", "kf51", "Ff"),
    alias("key_f52", "kf52", "Fg"),
    alias("key_f53", "kf53", "Fh"),
    alias("key_f54", "kf54", "Fi"),
    alias("key_f55", "kf55", "Fj"),
    alias("key_f56", "kf56", "Fk"),
    alias("key_f57", "kf57", "Fl"),
    alias("key_f58", "kf58", "Fm"),
    alias("key_f59", "kf59", "Fn"),
    alias("key_f60", "kf60", "Fo"),
    alias("key_f61", "kf61", "Fp"),
    alias("key_f62", "kf62", "Fq"),
    alias("key_f63", "kf63", "Fr"),
    alias("clr_bol", "el1", "cb"),
    alias("clear_margins", "mgc", "MC"),
    alias("set_left_margin", "smgl", "ML"),
    alias("set_right_margin", "smgr", "MR"),
    alias("label_format", "fln", "Lf"),
    alias("set_clock", "sclk", "SC"),
    alias("display_clock", "dclk", "DK"),
    alias("remove_clock", "rmclk", "RC"),
    alias("create_window", "cwin", "CW"),
    alias("goto_window", "wingo", "WG"),
    alias("hangup", "hup", "HU"),
    alias("dial_phone", "dial", "DI"),
    alias("quick_dial", "qdial", "QD"),
    alias("tone", "tone", "TO"),
    alias("pulse", "pulse", "PU"),
    alias("flash_hook", "hook", "fh"),
    alias("fixed_pause", "pause", "PA"),
    alias("wait_tone", "wait", "WA"),
    alias("user0", "u0", "u0"),
    alias("user1", "u1", "u1"),
    alias("user2", "u2", "u2"),
    alias("user3", "u3", "u3"),
    alias("user4", "u4", "u4"),
    alias("user5", "u5", "u5"),
    alias("user6", "u6", "u6"),
    alias("user7", "u7", "u7"),
    alias("user8", "u8", "u8"),
    alias("user9", "u9", "u9"),
    alias("orig_pair", "op", "op"),
    alias("orig_colors", "oc", "oc"),
    alias("initialize_color", "initc", "Ic"),
    alias("initialize_pair", "initp", "Ip"),
    alias("set_color_pair", "scp", "sp"),
    alias("set_foreground", "setf", "Sf"),
    alias("set_background", "setb", "Sb"),
    alias("change_char_pitch", "cpi", "ZA"),
    alias("change_line_pitch", "lpi", "ZB"),
    alias("change_res_horz", "chr", "ZC"),
    alias("change_res_vert", "cvr", "ZD"),
    alias("define_char", "defc", "ZE"),
    alias("enter_doublewide_mode", "swidm", "ZF"),
    alias("enter_draft_quality", "sdrfq", "ZG"),
    alias("enter_italics_mode", "sitm", "ZH"),
    alias("enter_leftward_mode", "slm", "ZI"),
    alias("enter_micro_mode", "smicm", "ZJ"),
    alias("enter_near_letter_quality", "snlq", "ZK"),
    alias("enter_normal_quality", "snrmq", "ZL"),
    alias("enter_shadow_mode", "sshm", "ZM"),
    alias("enter_subscript_mode", "ssubm", "ZN"),
    alias("enter_superscript_mode", "ssupm", "ZO"),
    alias("enter_upward_mode", "sum", "ZP"),
    alias("exit_doublewide_mode", "rwidm", "ZQ"),
    alias("exit_italics_mode", "ritm", "ZR"),
    alias("exit_leftward_mode", "rlm", "ZS"),
    alias("exit_micro_mode", "rmicm", "ZT"),
    alias("exit_shadow_mode", "rshm", "ZU"),
    alias("exit_subscript_mode", "rsubm", "ZV"),
    alias("exit_superscript_mode", "rsupm", "ZW"),
    alias("exit_upward_mode", "rum", "ZX"),
    alias("micro_column_address", "mhpa", "ZY"),
    alias("micro_down", "mcud1", "ZZ"),
    alias("micro_left", "mcub1", "Za"),
    alias("micro_right", "mcuf1", "Zb"),
    alias("micro_row_address", "mvpa", "Zc"),
    alias("micro_up", "mcuu1", "Zd"),
    alias("order_of_pins", "porder", "Ze"),
    alias("parm_down_micro", "mcud", "Zf"),
    alias("parm_left_micro", "mcub", "Zg"),
    alias("parm_right_micro", "mcuf", "Zh"),
    alias("parm_up_micro", "mcuu", "Zi"),
    alias("select_char_set", "scs", "Zj"),
    alias("set_bottom_margin", "smgb", "Zk"),
    alias("set_bottom_margin_parm", "smgbp", "Zl"),
    alias("set_left_margin_parm", "smglp", "Zm"),
    alias("set_right_margin_parm", "smgrp", "Zn"),
    alias("set_top_margin", "smgt", "Zo"),
    alias("set_top_margin_parm", "smgtp", "Zp"),
    alias("start_bit_image", "sbim", "Zq"),
    alias("start_char_set_def", "scsd", "Zr"),
    alias("stop_bit_image", "rbim", "Zs"),
    alias("stop_char_set_def", "rcsd", "Zt"),
    alias("subscript_characters", "subcs", "Zu"),
    alias("superscript_characters", "supcs", "Zv"),
    alias("these_cause_cr", "docr", "Zw"),
    alias("zero_motion", "zerom", "Zx"),
    alias("char_set_names", "csnm", "Zy"),
    alias("key_mouse", "kmous", "Km"),
    alias("mouse_info", "minfo", "Mi"),
    alias("req_mouse_pos", "reqmp", "RQ"),
    alias("get_mouse", "getm", "Gm"),
    alias("set_a_foreground", "setaf", "AF"),
    alias("set_a_background", "setab", "AB"),
    alias("pkey_plab", "pfxl", "xl"),
    alias("device_type", "devt", "dv"),
    alias("code_set_init", "csin", "ci"),
    alias("set0_des_seq", "s0ds", "s0"),
    alias("set1_des_seq", "s1ds", "s1"),
    alias("set2_des_seq", "s2ds", "s2"),
    alias("set3_des_seq", "s3ds", "s3"),
    alias("set_lr_margin", "smglr", "ML"),
    alias("set_tb_margin", "smgtb", "MT"),
    alias("bit_image_repeat", "birep", "Xy"),
    alias("bit_image_newline", "binel", "Zz"),
    alias("bit_image_carriage_return", "bicr", "Yv"),
    alias("color_names", "colornm", "Yw"),
    alias("define_bit_image_region", "defbi", "Yx"),
    alias("end_bit_image_region", "endbi", "Yy"),
    alias("set_color_band", "setcolor", "Yz"),
    alias("set_page_length", "slines", "YZ"),
    alias("display_pc_char", "dispc", "S1"),
    alias("enter_pc_charset_mode", "smpch", "S2"),
    alias("exit_pc_charset_mode", "rmpch", "S3"),
    alias("enter_scancode_mode", "smsc", "S4"),
    alias("exit_scancode_mode", "rmsc", "S5"),
    alias("pc_term_options", "pctrm", "S6"),
    alias("scancode_escape", "scesc", "S7"),
    alias("alt_scancode_esc", "scesa", "S8"),
    alias("enter_horizontal_hl_mode", "ehhlm", "Xh"),
    alias("enter_left_hl_mode", "elhlm", "Xl"),
    alias("enter_low_hl_mode", "elohlm", "Xo"),
    alias("enter_right_hl_mode", "erhlm", "Xr"),
    alias("enter_top_hl_mode", "ethlm", "Xt"),
    alias("enter_vertical_hl_mode", "evhlm", "Xv"),
    alias("set_a_attributes", "sgr1", "sA"),
    alias("set_pglen_inch", "slength", "sL"),
    alias("termcap_init2", "OTi2", "i2"),
    alias("termcap_reset", "OTrs", "rs"),
    alias("linefeed_if_not_lf", "OTnl", "nl"),
    alias("backspace_if_not_bs", "OTbs", "bs"),
    alias("other_non_function_keys", "OTko", "ko"),
    alias("arrow_key_map", "OTma", "ma"),
    alias("acs_ulcorner", "OTG2", "G2"),
    alias("acs_llcorner", "OTG3", "G3"),
    alias("acs_urcorner", "OTG1", "G1"),
    alias("acs_lrcorner", "OTG4", "G4"),
    alias("acs_ltee", "OTGR", "GR"),
    alias("acs_rtee", "OTGL", "GL"),
    alias("acs_btee", "OTGU", "GU"),
    alias("acs_ttee", "OTGD", "GD"),
    alias("acs_hline", "OTGH", "GH"),
    alias("acs_vline", "OTGV", "GV"),
    alias("acs_plus", "OTGC", "GC"),
    alias("memory_lock", "meml", "ml"),
    alias("memory_unlock", "memu", "mu"),
    alias("box_chars_1", "box1", "bx"),
];

/// Extra historical names accepted on lookup only.
const HISTORICAL: [(&str, &str); 3] = [
    ("beehive_glitch", "no_esc_ctlc"),
    ("teleray_glitch", "dest_tabs_magic_smso"),
    ("micro_char_size", "micro_col_size"),
];

/// Resolve any recognized alias to its canonical capability name.
///
/// Accepts canonical long names, terminfo short names, termcap codes and a
/// few historical synonyms. Returns `None` for unrecognized names (extended
/// capabilities have no alias entry and are looked up verbatim by callers).
pub fn resolve(name: &str) -> Option<&'static Alias> {
    for table in [&BOOLEANS[..], &NUMBERS[..], &STRINGS[..]] {
        if let Some(entry) = table
            .iter()
            .find(|a| a.name == name || a.terminfo == name || a.termcap == name)
        {
            return Some(entry);
        }
    }
    HISTORICAL
        .iter()
        .find(|(hist, _)| *hist == name)
        .and_then(|(_, canonical)| resolve(canonical))
}

/// Map a termcap code to its canonical name, for the termcap translator.
pub fn from_termcap(code: &str) -> Option<&'static Alias> {
    for table in [&BOOLEANS[..], &NUMBERS[..], &STRINGS[..]] {
        if let Some(entry) = table.iter().find(|a| a.termcap == code) {
            return Some(entry);
        }
    }
    None
}

/// DEC Special Character and Line Drawing Set, keyed by the source byte
/// that appears in `acs_chars` pairs.
pub const DEC_SPECIAL: [(u8, char); 31] = [
    (b'`', '\u{25c6}'),
    (b'a', '\u{2592}'),
    (b'b', '\u{0009}'),
    (b'c', '\u{000c}'),
    (b'd', '\u{000d}'),
    (b'e', '\u{000a}'),
    (b'f', '\u{00b0}'),
    (b'g', '\u{00b1}'),
    (b'h', '\u{2424}'),
    (b'i', '\u{000b}'),
    (b'j', '\u{2518}'),
    (b'k', '\u{2510}'),
    (b'l', '\u{250c}'),
    (b'm', '\u{2514}'),
    (b'n', '\u{253c}'),
    (b'o', '\u{23ba}'),
    (b'p', '\u{23bb}'),
    (b'q', '\u{2500}'),
    (b'r', '\u{23bc}'),
    (b's', '\u{23bd}'),
    (b't', '\u{251c}'),
    (b'u', '\u{2524}'),
    (b'v', '\u{2534}'),
    (b'w', '\u{252c}'),
    (b'x', '\u{2502}'),
    (b'y', '\u{2264}'),
    (b'z', '\u{2265}'),
    (b'{', '\u{03c0}'),
    (b'|', '\u{2260}'),
    (b'}', '\u{00a3}'),
    (b'~', '\u{00b7}'),
];

/// Look up the display glyph for one DEC special-set byte.
pub fn dec_special(byte: u8) -> Option<char> {
    DEC_SPECIAL
        .iter()
        .find(|(b, _)| *b == byte)
        .map(|(_, glyph)| *glyph)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolve_by_any_column() {
        for query in ["cursor_address", "cup", "cm"] {
            let entry = resolve(query).unwrap();
            assert_eq!(entry.name, "cursor_address");
            assert_eq!(entry.terminfo, "cup");
            assert_eq!(entry.termcap, "cm");
        }
    }

    #[test]
    fn resolve_historical() {
        assert_eq!(resolve("teleray_glitch").unwrap().name, "dest_tabs_magic_smso");
        assert_eq!(resolve("micro_char_size").unwrap().name, "micro_col_size");
    }

    #[test]
    fn resolve_unknown() {
        assert!(resolve("no_such_capability").is_none());
        assert!(resolve("Cs").is_none()); // extended caps have no alias entry
    }

    #[test]
    fn tables_are_unique_per_kind() {
        for table in [&BOOLEANS[..], &NUMBERS[..], &STRINGS[..]] {
            let mut names: Vec<_> = table.iter().map(|a| a.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), table.len());
        }
    }

    #[test]
    fn termcap_mapping() {
        assert_eq!(from_termcap("cm").unwrap().name, "cursor_address");
        assert_eq!(from_termcap("co").unwrap().name, "columns");
        assert_eq!(from_termcap("xn").unwrap().name, "eat_newline_glitch");
        assert!(from_termcap("zz").is_none());
    }

    #[test]
    fn dec_special_set() {
        assert_eq!(dec_special(b'j'), Some('\u{2518}'));
        assert_eq!(dec_special(b'x'), Some('\u{2502}'));
        assert_eq!(dec_special(b'Z'), None);
    }
}
