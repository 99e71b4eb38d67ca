use std::path::PathBuf;
use std::process;

use structopt::StructOpt;

use sendpost::api::SendResult;
use sendpost::email::{Attachment, EmailAddress, EmailMessage, Recipient};
use sendpost::{Client, EmailTransport, Error};

mod samples;

const HTML_BODY_ATTACHMENTS: &str = "<h1>Hello!</h1><p>This email contains file attachments.</p><p>Please check the attachments below.</p>";
const TEXT_BODY_ATTACHMENTS: &str =
    "Hello!\n\nThis email contains file attachments.\nPlease check the attachments below.";

const HTML_BODY_CC: &str = "<h1>Hello!</h1><p>This email has CC recipients.</p><p>All CC recipients will receive a copy of this email.</p>";
const TEXT_BODY_CC: &str =
    "Hello!\n\nThis email has CC recipients.\nAll CC recipients will receive a copy of this email.";

const HTML_BODY_BCC: &str = "<h1>Hello!</h1><p>This email has BCC recipients.</p><p>BCC recipients receive a copy, but their addresses are hidden from other recipients.</p>";
const TEXT_BODY_BCC: &str = "Hello!\n\nThis email has BCC recipients.\nBCC recipients receive a copy, but their addresses are hidden from other recipients.";

#[derive(Debug, StructOpt)]
#[structopt(
    name = "sendpost-cli",
    about = "Send transactional email through the SendPost API."
)]
struct Opt {
    /// Sender address
    #[structopt(long, default_value = "sender@yourdomain.com")]
    from: String,

    /// Sender display name
    #[structopt(long, default_value = "Your Company")]
    from_name: String,

    /// Primary recipient address
    #[structopt(long, default_value = "recipient@example.com")]
    to: String,

    /// Primary recipient display name
    #[structopt(long, default_value = "Customer")]
    to_name: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Send an email with file attachments
    Attachments {
        /// Files to attach; sample files are generated if none are given
        #[structopt(long = "file")]
        files: Vec<PathBuf>,
    },
    /// Send an email with CC recipients
    Cc {
        /// CC addresses (visible to all recipients)
        #[structopt(long = "cc")]
        cc: Vec<String>,
    },
    /// Send an email with BCC recipients
    Bcc {
        /// BCC addresses (hidden from other recipients)
        #[structopt(long = "bcc")]
        bcc: Vec<String>,
    },
}

fn parse_addresses(raw: &[String]) -> Result<Vec<EmailAddress>, Error> {
    raw.iter().map(|a| EmailAddress::new(a, None)).collect()
}

fn join_addresses(addresses: &[EmailAddress]) -> String {
    addresses
        .iter()
        .map(|a| a.email.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn send_with_attachments<T: EmailTransport>(
    transport: &T,
    from: EmailAddress,
    to: EmailAddress,
    files: &[PathBuf],
) -> Result<Vec<SendResult>, Error> {
    // Generated sample files live until this function returns, so they
    // are removed after the send attempt on success and error alike
    let (paths, _samples) = if files.is_empty() {
        let samples = samples::SampleFiles::create()?;
        (samples.paths().to_vec(), Some(samples))
    } else {
        (files.to_vec(), None)
    };

    let mut builder = EmailMessage::builder(from.clone(), "Email with Attachments")
        .to(Recipient::new(to.clone()))
        .html_body(HTML_BODY_ATTACHMENTS)
        .text_body(TEXT_BODY_ATTACHMENTS)
        .track_opens(true)
        .track_clicks(true);

    for path in &paths {
        builder = builder.attachment(Attachment::from_file(path)?);
    }

    let message = builder.build()?;

    println!("Sending email with attachments...");
    println!("  From: {}", from.email);
    println!("  To: {}", to.email);
    println!("  Subject: {}", message.subject);
    println!("  Attachments: {} file(s)", message.attachments.len());
    for attachment in &message.attachments {
        println!("    - {}", attachment.filename);
    }

    transport.send_email(&message)
}

fn send_with_cc<T: EmailTransport>(
    transport: &T,
    from: EmailAddress,
    to: EmailAddress,
    cc: &[String],
) -> Result<Vec<SendResult>, Error> {
    let default = vec!["cc1@example.com".to_string(), "cc2@example.com".to_string()];
    let cc = parse_addresses(if cc.is_empty() { &default } else { cc })?;

    let message = EmailMessage::builder(from.clone(), "Email with CC Recipients")
        .to(Recipient::new(to.clone()).with_cc(cc.clone()))
        .html_body(HTML_BODY_CC)
        .text_body(TEXT_BODY_CC)
        .track_opens(true)
        .track_clicks(true)
        .build()?;

    println!("Sending email with CC...");
    println!("  From: {}", from.email);
    println!("  To: {}", to.email);
    println!("  CC: {}", join_addresses(&cc));
    println!("  Subject: {}", message.subject);

    transport.send_email(&message)
}

fn send_with_bcc<T: EmailTransport>(
    transport: &T,
    from: EmailAddress,
    to: EmailAddress,
    bcc: &[String],
) -> Result<Vec<SendResult>, Error> {
    let default = vec!["bcc1@example.com".to_string(), "bcc2@example.com".to_string()];
    let bcc = parse_addresses(if bcc.is_empty() { &default } else { bcc })?;

    let message = EmailMessage::builder(from.clone(), "Email with BCC Recipients")
        .to(Recipient::new(to.clone()).with_bcc(bcc.clone()))
        .html_body(HTML_BODY_BCC)
        .text_body(TEXT_BODY_BCC)
        .track_opens(true)
        .track_clicks(true)
        .build()?;

    println!("Sending email with BCC...");
    println!("  From: {}", from.email);
    println!("  To: {}", to.email);
    println!(
        "  BCC: {} (hidden from other recipients)",
        join_addresses(&bcc)
    );
    println!("  Subject: {}", message.subject);

    transport.send_email(&message)
}

fn run<T: EmailTransport>(opt: &Opt, transport: &T) -> Result<Vec<SendResult>, Error> {
    let from = EmailAddress::new(&opt.from, Some(&opt.from_name))?;
    let to = EmailAddress::new(&opt.to, Some(&opt.to_name))?;

    match &opt.cmd {
        Command::Attachments { files } => send_with_attachments(transport, from, to, files),
        Command::Cc { cc } => send_with_cc(transport, from, to, cc),
        Command::Bcc { bcc } => send_with_bcc(transport, from, to, bcc),
    }
}

fn report_success(results: &[SendResult]) {
    if let Some(first) = results.first() {
        println!();
        println!("✓ Email sent successfully!");
        println!("  Message ID: {}", first.message_id);
        println!("  To: {}", first.to);
    } else {
        println!();
        println!("✗ No response received from API");
    }
}

fn report_failure(err: &Error) {
    println!();

    match err {
        Error::Transport { status, body } => {
            println!("✗ Failed to send email:");
            println!("  Status code: {}", status);
            println!("  Response body: {}", body);
        }
        _ => {
            println!("✗ Unexpected error:");
            println!("  {}", err);
        }
    }
}

fn main() {
    // Init logger
    env_logger::builder().format_timestamp_micros().init();

    let opt = Opt::from_args();

    let settings = sendpost::config::load_config(None);
    let api_key = match sendpost::config::api_key(&settings) {
        Some(k) => k.to_string(),
        None => {
            eprintln!("ERROR: SENDPOST_SUB_ACCOUNT_API_KEY environment variable is not set!");
            eprintln!("Please set it before running:");
            eprintln!("  export SENDPOST_SUB_ACCOUNT_API_KEY=your_api_key_here");
            process::exit(1);
        }
    };

    let client = Client::from_api_key(&api_key);

    match run(&opt, &client) {
        Ok(results) => report_success(&results),
        Err(err) => {
            log::error!("Send failed: {}", err);
            report_failure(&err);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every message it is handed and answers with a canned
    /// result for the primary recipient.
    struct MockTransport {
        sent: RefCell<Vec<EmailMessage>>,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl EmailTransport for MockTransport {
        fn send_email(&self, message: &EmailMessage) -> Result<Vec<SendResult>, Error> {
            self.sent.borrow_mut().push(message.clone());

            Ok(vec![SendResult {
                message_id: "abc123".to_string(),
                to: message.to[0].address.email.clone(),
            }])
        }
    }

    fn opt(cmd: Command) -> Opt {
        Opt {
            from: "sender@yourdomain.com".to_string(),
            from_name: "Your Company".to_string(),
            to: "recipient@example.com".to_string(),
            to_name: "Customer".to_string(),
            cmd,
        }
    }

    #[test]
    fn test_cc_defaults() {
        let transport = MockTransport::new();
        let results = run(&opt(Command::Cc { cc: Vec::new() }), &transport).unwrap();

        assert_eq!(results[0].message_id, "abc123");
        assert_eq!(results[0].to, "recipient@example.com");

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Email with CC Recipients");
        assert_eq!(sent[0].to.len(), 1);
        assert_eq!(sent[0].to[0].cc.len(), 2);
        assert_eq!(sent[0].to[0].cc[0].email, "cc1@example.com");
        assert_eq!(sent[0].to[0].cc[1].email, "cc2@example.com");
    }

    #[test]
    fn test_bcc_stays_under_recipient() {
        let transport = MockTransport::new();
        run(
            &opt(Command::Bcc {
                bcc: vec!["hidden@example.com".to_string()],
            }),
            &transport,
        )
        .unwrap();

        let sent = transport.sent.borrow();
        let payload = serde_json::to_value(&sent[0]).unwrap();

        assert!(payload.get("bcc").is_none());
        assert_eq!(payload["to"][0]["bcc"][0]["email"], "hidden@example.com");
    }

    #[test]
    fn test_attachments_sample_files_cleaned_up() {
        let transport = MockTransport::new();
        run(&opt(Command::Attachments { files: Vec::new() }), &transport).unwrap();

        let sent = transport.sent.borrow();
        assert_eq!(sent[0].attachments.len(), 2);
        assert_eq!(sent[0].attachments[0].filename, "sample_document.txt");
        assert_eq!(sent[0].attachments[1].filename, "sample_file.txt");

        // Sample files are gone once the send attempt has run
        for name in &["sample_document.txt", "sample_file.txt"] {
            assert!(!std::env::temp_dir().join(name).exists());
        }
    }

    #[test]
    fn test_invalid_recipient_fails_before_transport() {
        let transport = MockTransport::new();
        let mut opt = opt(Command::Cc { cc: Vec::new() });
        opt.to = "not-an-address".to_string();

        let result = run(&opt, &transport);

        assert!(result.is_err());
        assert!(transport.sent.borrow().is_empty());
    }
}
