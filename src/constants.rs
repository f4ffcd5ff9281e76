// Collaborators
pub const DEFAULT_VIACEP_URL: &str = "https://viacep.com.br/ws";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api";
pub const REGISTRATION_PATH: &str = "usuarios";

// Timing
pub const DEFAULT_API_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_RESET_DELAY_MS: u64 = 2000;

// Environment keys
pub const ENV_VIACEP_URL: &str = "CADASTRO_VIACEP_URL";
pub const ENV_BACKEND_URL: &str = "CADASTRO_BACKEND_URL";
pub const ENV_API_TIMEOUT_MS: &str = "CADASTRO_API_TIMEOUT_MS";
pub const ENV_RESET_DELAY_MS: &str = "CADASTRO_RESET_DELAY_MS";
pub const ENV_LOG_FORMAT: &str = "CADASTRO_LOG_FORMAT";

// Postal lookup
pub const POSTAL_CODE_DIGITS: usize = 8;
pub const MESSAGE_CEP_INVALID: &str = "CEP inválido. Por favor, insira um CEP com 8 dígitos.";
pub const MESSAGE_CEP_NOT_FOUND: &str = "CEP não encontrado. Por favor, verifique o número.";
pub const MESSAGE_CEP_FOUND: &str = "Endereço encontrado com sucesso!";
pub const MESSAGE_CEP_TRANSPORT: &str =
    "Erro ao buscar CEP. Verifique sua conexão e tente novamente.";

// Submission
pub const MESSAGE_REGISTRATION_SUCCESS: &str = "Cadastro realizado com sucesso! ID: ";
pub const MESSAGE_REGISTRATION_FAILED: &str = "Erro ao cadastrar usuário. Tente novamente.";
pub const MESSAGE_SERVER_ERROR: &str = "Erro no servidor. Tente novamente mais tarde.";
pub const MESSAGE_TIMEOUT: &str = "Tempo limite excedido. Verifique sua conexão.";
pub const REJECTION_AGGREGATE_KEY: &str = "erro";
pub const REJECTION_SEPARATOR: &str = ", ";

// Field messages
pub const MESSAGE_NOME_REQUIRED: &str = "Nome é obrigatório";
pub const MESSAGE_NOME_MIN_LENGTH: &str = "Nome deve ter no mínimo 3 caracteres";
pub const MESSAGE_NOME_PATTERN: &str = "Nome deve conter apenas letras";
pub const MESSAGE_SOBRENOME_REQUIRED: &str = "Sobrenome é obrigatório";
pub const MESSAGE_SOBRENOME_MIN_LENGTH: &str = "Sobrenome deve ter no mínimo 3 caracteres";
pub const MESSAGE_SOBRENOME_PATTERN: &str = "Sobrenome deve conter apenas letras";
pub const MESSAGE_EMAIL_REQUIRED: &str = "Email é obrigatório";
pub const MESSAGE_EMAIL_PATTERN: &str = "Por favor, insira um email válido";
pub const MESSAGE_SENHA_REQUIRED: &str = "Senha é obrigatória";
pub const MESSAGE_SENHA_MIN_LENGTH: &str = "Senha deve ter no mínimo 6 caracteres";
pub const MESSAGE_CEP_REQUIRED: &str = "CEP é obrigatório";
pub const MESSAGE_CEP_PATTERN: &str = "CEP deve estar no formato 00000-000";
pub const MESSAGE_RUA_REQUIRED: &str = "Rua é obrigatória";
pub const MESSAGE_RUA_MIN_LENGTH: &str = "Rua deve ter no mínimo 3 caracteres";
pub const MESSAGE_NUMERO_REQUIRED: &str = "Número é obrigatório";
pub const MESSAGE_NUMERO_PATTERN: &str = "Número deve conter apenas dígitos";
pub const MESSAGE_BAIRRO_REQUIRED: &str = "Bairro é obrigatório";
pub const MESSAGE_BAIRRO_MIN_LENGTH: &str = "Bairro deve ter no mínimo 2 caracteres";
pub const MESSAGE_CIDADE_REQUIRED: &str = "Cidade é obrigatória";
pub const MESSAGE_CIDADE_MIN_LENGTH: &str = "Cidade deve ter no mínimo 2 caracteres";
pub const MESSAGE_ESTADO_REQUIRED: &str = "Estado é obrigatório";
pub const MESSAGE_ESTADO_PATTERN: &str = "Estado deve ser a sigla (ex: SP, RJ, MG)";

// Patterns
pub const PATTERN_NAME: &str = r"^[a-zA-ZáéíóúãõâêôçÁÉÍÓÚÃÕÂÊÔÇ\s]+$";
pub const PATTERN_EMAIL: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
pub const PATTERN_CEP: &str = r"^[0-9]{5}-?[0-9]{3}$";
pub const PATTERN_DIGITS: &str = r"^[0-9]+$";
pub const PATTERN_UF: &str = r"^[A-Z]{2}$";
