mod details_tests;
