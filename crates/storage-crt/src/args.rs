//! Translation of extra arguments onto SDK request builders.

use aws_sdk_s3::operation::get_object::builders::GetObjectFluentBuilder;
use aws_sdk_s3::operation::put_object::builders::PutObjectFluentBuilder;
use aws_sdk_s3::types::{
    ChecksumAlgorithm, ChecksumMode, ObjectCannedAcl, RequestPayer, ServerSideEncryption,
    StorageClass,
};
use rusty_resources_storage::{ExtraArgs, StorageError};

fn unsupported(operation: &str, name: &str) -> StorageError {
    StorageError::InvalidConfig {
        message: format!("Unsupported {} parameter '{}'", operation, name),
    }
}

/// Apply extra arguments to a PutObject request.
///
/// # Arguments
/// * `request` - Request builder with bucket, key and body set
/// * `args` - Extra arguments to apply
/// * `expected_bucket_owner` - Client-wide default, overridden by `ExpectedBucketOwner`
pub(crate) fn apply_put_args(
    mut request: PutObjectFluentBuilder,
    args: &ExtraArgs,
    expected_bucket_owner: Option<&str>,
) -> Result<PutObjectFluentBuilder, StorageError> {
    if let Some(owner) = expected_bucket_owner {
        request = request.expected_bucket_owner(owner);
    }

    for (name, value) in args.params() {
        request = match name {
            "ACL" => request.acl(ObjectCannedAcl::from(value)),
            "CacheControl" => request.cache_control(value),
            "ChecksumAlgorithm" => request.checksum_algorithm(ChecksumAlgorithm::from(value)),
            "ContentDisposition" => request.content_disposition(value),
            "ContentEncoding" => request.content_encoding(value),
            "ContentLanguage" => request.content_language(value),
            "ContentType" => request.content_type(value),
            "ExpectedBucketOwner" => request.expected_bucket_owner(value),
            "GrantFullControl" => request.grant_full_control(value),
            "GrantRead" => request.grant_read(value),
            "GrantReadACP" => request.grant_read_acp(value),
            "GrantWriteACP" => request.grant_write_acp(value),
            "RequestPayer" => request.request_payer(RequestPayer::from(value)),
            "SSECustomerAlgorithm" => request.sse_customer_algorithm(value),
            "SSECustomerKey" => request.sse_customer_key(value),
            "SSECustomerKeyMD5" => request.sse_customer_key_md5(value),
            "SSEKMSKeyId" => request.ssekms_key_id(value),
            "ServerSideEncryption" => {
                request.server_side_encryption(ServerSideEncryption::from(value))
            }
            "StorageClass" => request.storage_class(StorageClass::from(value)),
            "Tagging" => request.tagging(value),
            "WebsiteRedirectLocation" => request.website_redirect_location(value),
            other => return Err(unsupported("PutObject", other)),
        };
    }

    for (key, value) in args.metadata() {
        request = request.metadata(key, value);
    }

    Ok(request)
}

/// Apply extra arguments to a GetObject request.
///
/// # Arguments
/// * `request` - Request builder with bucket and key set
/// * `args` - Extra arguments to apply
/// * `expected_bucket_owner` - Client-wide default, overridden by `ExpectedBucketOwner`
pub(crate) fn apply_get_args(
    mut request: GetObjectFluentBuilder,
    args: &ExtraArgs,
    expected_bucket_owner: Option<&str>,
) -> Result<GetObjectFluentBuilder, StorageError> {
    if let Some(owner) = expected_bucket_owner {
        request = request.expected_bucket_owner(owner);
    }

    if !args.metadata().is_empty() {
        return Err(unsupported("GetObject", ExtraArgs::METADATA));
    }

    for (name, value) in args.params() {
        request = match name {
            "ChecksumMode" => request.checksum_mode(ChecksumMode::from(value)),
            "ExpectedBucketOwner" => request.expected_bucket_owner(value),
            "RequestPayer" => request.request_payer(RequestPayer::from(value)),
            "SSECustomerAlgorithm" => request.sse_customer_algorithm(value),
            "SSECustomerKey" => request.sse_customer_key(value),
            "SSECustomerKeyMD5" => request.sse_customer_key_md5(value),
            "VersionId" => request.version_id(value),
            other => return Err(unsupported("GetObject", other)),
        };
    }

    Ok(request)
}
