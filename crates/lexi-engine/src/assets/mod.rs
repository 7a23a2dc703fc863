pub mod word_bank;
