mod compare_files_byte_for_byte;
mod print_canonical_form;
