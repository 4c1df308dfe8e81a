use std::fmt;

/// Response codes the client treats as non-fatal. The body of such a
/// response is not returned, but the caller still gets the raw preamble.
// Review: the list mixes "already exists" codes with consumer group codes
// and two connectivity codes; kept exactly as the broker SDKs ship it.
pub const SOFT_ERROR_CODES: [u32; 8] = [2012, 2013, 1011, 1012, 46, 51, 5001, 5004];

pub fn is_soft_error(code: u32) -> bool {
    SOFT_ERROR_CODES.contains(&code)
}

/// A non-zero response code returned by the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerError {
    pub code: u32,
    pub name: &'static str,
}

impl ServerError {
    pub fn from_code(code: u32) -> Self {
        ServerError {
            code,
            name: error_name(code),
        }
    }

    pub fn is_soft(&self) -> bool {
        is_soft_error(self.code)
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}'", self.code, self.name)
    }
}

impl std::error::Error for ServerError {}

pub fn error_name(code: u32) -> &'static str {
    match code {
        1 => "error",
        2 => "invalid_configuration",
        3 => "invalid_command",
        4 => "invalid_format",
        5 => "feature_unavailable",
        6 => "invalid_identifier",
        10 => "cannot_create_base_directory",
        20 => "resource_not_found",
        21 => "cannot_load_resource",
        22 => "cannot_save_resource",
        23 => "cannot_delete_resource",
        24 => "cannot_serialize_resource",
        25 => "cannot_deserialize_resource",
        40 => "unauthenticated",
        41 => "unauthorized",
        42 => "invalid_credentials",
        43 => "invalid_username",
        44 => "invalid_password",
        51 => "not_connected",
        52 => "request_error",
        60 => "invalid_encryption_key",
        61 => "cannot_encrypt_data",
        62 => "cannot_decrypt_data",
        100 => "client_not_found",
        101 => "invalid_client_id",
        200 => "io_error",
        201 => "write_error",
        202 => "cannot_parse_utf8",
        203 => "cannot_parse_int",
        204 => "cannot_parse_slice",
        206 => "connection_closed",
        300 => "http_response_error",
        301 => "request_middleware_error",
        302 => "cannot_create_endpoint",
        303 => "cannot_parse_url",
        304 => "invalid_response",
        305 => "empty_response",
        306 => "cannot_parse_address",
        307 => "read_error",
        308 => "connection_error",
        309 => "read_to_end_error",
        1000 => "cannot_create_streams_directory",
        1001 => "cannot_create_stream_directory",
        1002 => "cannot_create_stream_info",
        1003 => "cannot_update_stream_info",
        1004 => "cannot_open_stream_info",
        1005 => "cannot_read_stream_info",
        1006 => "cannot_create_stream",
        1007 => "cannot_delete_stream",
        1008 => "cannot_delete_stream_directory",
        1009 => "stream_id_not_found",
        1010 => "stream_name_not_found",
        1011 => "stream_id_already_exists",
        1012 => "stream_name_already_exists",
        1013 => "invalid_stream_name",
        1014 => "invalid_stream_id",
        1015 => "cannot_read_streams",
        2000 => "cannot_create_topics_directory",
        2001 => "cannot_create_topic_directory",
        2002 => "cannot_create_topic_info",
        2003 => "cannot_update_topic_info",
        2004 => "cannot_open_topic_info",
        2005 => "cannot_read_topic_info",
        2006 => "cannot_create_topic",
        2007 => "cannot_delete_topic",
        2008 => "cannot_delete_topic_directory",
        2009 => "cannot_poll_topic",
        2010 => "topic_id_not_found",
        2011 => "topic_name_not_found",
        2012 => "topic_id_already_exists",
        2013 => "topic_name_already_exists",
        2014 => "invalid_topic_name",
        2015 => "too_many_partitions",
        2016 => "invalid_topic_id",
        2017 => "cannot_read_topics",
        3000 => "cannot_create_partition",
        3001 => "cannot_create_partitions_directory",
        3002 => "cannot_create_partition_directory",
        3003 => "cannot_open_partition_log_file",
        3004 => "cannot_read_partitions",
        3005 => "cannot_delete_partition",
        3006 => "cannot_delete_partition_directory",
        3007 => "partition_not_found",
        3008 => "no_partitions",
        4000 => "segment_not_found",
        4001 => "segment_closed",
        4002 => "invalid_segment_size",
        4003 => "cannot_create_segment_log_file",
        4004 => "cannot_create_segment_index_file",
        4005 => "cannot_create_segment_time_index_file",
        4006 => "cannot_save_messages_to_segment",
        4007 => "cannot_save_index_to_segment",
        4008 => "cannot_save_time_index_to_segment",
        4009 => "invalid_messages_count",
        4010 => "cannot_append_message",
        4011 => "cannot_read_message",
        4012 => "cannot_read_message_id",
        4013 => "cannot_read_message_state",
        4014 => "cannot_read_message_timestamp",
        4015 => "cannot_read_headers_length",
        4016 => "cannot_read_headers_payload",
        4017 => "too_big_headers_payload",
        4018 => "invalid_header_key",
        4019 => "invalid_header_value",
        4020 => "cannot_read_message_length",
        4021 => "cannot_read_message_payload",
        4022 => "too_big_message_payload",
        4023 => "too_many_messages",
        4024 => "empty_message_payload",
        4025 => "invalid_message_payload_length",
        4026 => "cannot_read_message_checksum",
        4027 => "invalid_message_checksum",
        4028 => "invalid_key_value_length",
        4032 => "non_zero_timestamp",
        4036 => "invalid_messages_size",
        4100 => "invalid_offset",
        4101 => "cannot_read_consumer_offsets",
        5000 => "consumer_group_not_found",
        5001 => "consumer_group_already_exists",
        5002 => "consumer_group_member_not_found",
        5003 => "invalid_consumer_group_id",
        5004 => "cannot_create_consumer_groups_directory",
        5005 => "cannot_read_consumer_groups",
        5006 => "cannot_create_consumer_group_info",
        5007 => "cannot_delete_consumer_group_info",
        _ => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_codes() {
        assert_eq!(ServerError::from_code(40).name, "unauthenticated");
        assert_eq!(ServerError::from_code(1012).name, "stream_name_already_exists");
        assert_eq!(ServerError::from_code(123456).name, "error");
    }

    #[test]
    fn test_soft_codes() {
        assert!(ServerError::from_code(1012).is_soft());
        assert!(ServerError::from_code(5001).is_soft());
        assert!(!ServerError::from_code(40).is_soft());
        assert!(!ServerError::from_code(5000).is_soft());
    }
}
