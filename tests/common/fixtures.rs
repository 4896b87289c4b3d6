//! Reusable test content.

/// Manifest of the sample app
pub const APP_MANIFEST: &str = r#"[package]
name = "myapp"
version = "0.1.0"
edition = "2021"
"#;

/// Account the stub CLI reports
pub const ACCOUNT_ID: &str = "123456789012";

/// Stub `aws` executable backed by a state directory (`$STUB_STATE`)
///
/// Buckets and objects are directories and files under `buckets/`; each
/// stack is a directory under `stacks/` holding `status` and `template.json`.
/// Every invocation is appended to `calls.log`. Setting
/// `STUB_UPDATE_STATUS` decides the status an update settles in.
pub const STUB_AWS: &str = r#"#!/bin/sh
state="$STUB_STATE"
echo "$*" >> "$state/calls.log"

while [ $# -gt 0 ]; do
  case "$1" in
    --output|--region|--profile) shift 2 ;;
    *) break ;;
  esac
done

svc="$1"; op="$2"; shift 2

arg() {
  flag="$1"; shift
  while [ $# -gt 0 ]; do
    if [ "$1" = "$flag" ]; then echo "$2"; return; fi
    shift
  done
}

fail() {
  echo "" >&2
  echo "An error occurred ($1) when calling the $2 operation: $3" >&2
  exit 254
}

case "$svc $op" in
  "sts get-caller-identity")
    echo '{"UserId":"AIDAEXAMPLE","Account":"123456789012","Arn":"arn:aws:iam::123456789012:user/ci"}'
    ;;
  "s3api head-bucket")
    b=$(arg --bucket "$@")
    [ -d "$state/buckets/$b" ] || fail 404 HeadBucket "Not Found"
    ;;
  "s3api create-bucket")
    b=$(arg --bucket "$@")
    mkdir -p "$state/buckets/$b"
    echo "{\"Location\":\"/$b\"}"
    ;;
  "s3api head-object")
    b=$(arg --bucket "$@"); k=$(arg --key "$@")
    [ -f "$state/buckets/$b/$k" ] || fail 404 HeadObject "Not Found"
    echo '{"ContentLength":1}'
    ;;
  "s3api put-object")
    b=$(arg --bucket "$@"); k=$(arg --key "$@"); body=$(arg --body "$@")
    cp "$body" "$state/buckets/$b/$k"
    echo '{"ETag":"\"stub\""}'
    ;;
  "ec2 describe-subnets")
    echo '{"Subnets":[{"SubnetId":"subnet-aaa"},{"SubnetId":"subnet-bbb"}]}'
    ;;
  "cloudformation validate-template")
    echo '{"Parameters":[],"Capabilities":["CAPABILITY_IAM"]}'
    ;;
  "cloudformation describe-stacks")
    printf '{"Stacks":['
    sep=""
    for dir in "$state"/stacks/*; do
      [ -d "$dir" ] || continue
      name=$(basename "$dir"); status=$(cat "$dir/status")
      printf '%s{"StackName":"%s","StackStatus":"%s","Outputs":[{"OutputKey":"LoadbalancerDNSName","OutputValue":"%s-lb.eu-west-2.elb.amazonaws.com"}]}' "$sep" "$name" "$status" "$name"
      sep=","
    done
    printf ']}\n'
    ;;
  "cloudformation create-stack")
    name=$(arg --stack-name "$@"); tpl=$(arg --template-body "$@")
    mkdir -p "$state/stacks/$name"
    cp "${tpl#file://}" "$state/stacks/$name/template.json"
    echo CREATE_COMPLETE > "$state/stacks/$name/status"
    echo "{\"StackId\":\"arn:aws:cloudformation:eu-west-2:123456789012:stack/$name/1\"}"
    ;;
  "cloudformation update-stack")
    name=$(arg --stack-name "$@"); tpl=$(arg --template-body "$@")
    [ -d "$state/stacks/$name" ] || fail ValidationError UpdateStack "Stack [$name] does not exist"
    if cmp -s "${tpl#file://}" "$state/stacks/$name/template.json"; then
      fail ValidationError UpdateStack "No updates are to be performed."
    fi
    cp "${tpl#file://}" "$state/stacks/$name/template.json"
    echo "${STUB_UPDATE_STATUS:-UPDATE_COMPLETE}" > "$state/stacks/$name/status"
    echo "{\"StackId\":\"arn:aws:cloudformation:eu-west-2:123456789012:stack/$name/1\"}"
    ;;
  *)
    echo "stub aws: unexpected call: $svc $op" >&2
    exit 2
    ;;
esac
"#;
