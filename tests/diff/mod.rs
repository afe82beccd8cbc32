mod compare_office_archives;
mod compare_single_pair_of_files;
mod report_added_xml_file_as_pure_insertion;
mod report_deleted_file_once;
mod skip_malformed_files_unless_strict;
mod write_report_to_output_file;
