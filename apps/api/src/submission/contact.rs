//! Respondent contact helpers: phone normalization and WhatsApp deep links.

/// Brazilian country code prepended to respondent phones in admin links.
const COUNTRY_CODE: &str = "55";

/// Digits of `raw`, or `None` unless there are 10 (landline) or 11 (mobile) of them.
pub fn phone_digits(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    (10..=11).contains(&digits.len()).then_some(digits)
}

/// `https://wa.me/<number>?text=<message>` with the message percent-encoded.
pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!("https://wa.me/{number}?text={}", urlencoding::encode(message))
}

/// Link the respondent opens to ask for their report on the business number.
pub fn respondent_link(business_number: &str, quiz_title: &str, name: &str, id: &str) -> String {
    let message = format!(
        "Olá! Preenchi o questionário escrito \"{quiz_title}\" e quero receber meu relatório.\n\nNome: {name}\nID: {id}"
    );
    whatsapp_link(business_number, &message)
}

/// Link the admin opens to message a respondent. `None` when the stored phone is not usable.
pub fn admin_link(phone: &str, name: &str, quiz_title: &str) -> Option<String> {
    let digits = phone_digits(phone)?;
    let first_name = name.split_whitespace().next().unwrap_or(name);
    let message = format!(
        "Olá, {first_name}! Aqui é da equipe do teste \"{quiz_title}\". Seu relatório está pronto, podemos conversar?"
    );
    Some(whatsapp_link(&format!("{COUNTRY_CODE}{digits}"), &message))
}
